//! Fuzz target for `Read::new`.
//!
//! Tests that read validation handles arbitrary byte input gracefully,
//! either accepting valid DNA sequences or rejecting invalid ones.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rustig::Read;

fuzz_target!(|data: &[u8]| {
    // new should either succeed or fail gracefully - never panic
    match Read::new(data) {
        Ok(read) => {
            // If successful, the bytes should only contain uppercase bases
            for &byte in read.as_bytes() {
                assert!(
                    byte == b'A' || byte == b'C' || byte == b'G' || byte == b'T',
                    "Invalid base in accepted read: {}",
                    byte as char
                );
            }

            // Length should be preserved
            assert_eq!(read.len(), data.len());
        }
        Err(err) => {
            // Error should report a valid position
            assert!(
                err.position < data.len(),
                "Error position {} out of bounds for data len {}",
                err.position,
                data.len()
            );

            // Error should report the byte as it appeared in the input
            assert_eq!(
                err.base, data[err.position],
                "Error byte mismatch at position {}",
                err.position
            );
        }
    }
});
