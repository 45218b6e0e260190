//! Fuzz target for the full assembly pipeline.
//!
//! Feeds arbitrary byte chunks through validation, graph construction,
//! simplification, and contig extraction, checking structural invariants
//! along the way.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rustig::{Assembler, ShortReadPolicy};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as newline-separated candidate reads
    if data.len() > 4096 {
        return;
    }
    let sequences: Vec<&[u8]> = data.split(|&b| b == b'\n').collect();
    let sequences: Vec<String> = sequences
        .iter()
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect();

    let assembler = Assembler::new()
        .k(5)
        .unwrap()
        .short_reads(ShortReadPolicy::Skip);

    // Malformed reads are discarded, short reads skipped - assembly
    // itself must never panic
    let assembly = match assembler.assemble_sequences(sequences) {
        Ok(assembly) => assembly,
        Err(_) => return,
    };

    for contig in &assembly.contigs {
        // Every contig spells at least one (k-1)-mer node
        assert!(contig.len() >= 4, "contig shorter than a node: {contig}");
        assert!(contig
            .sequence()
            .bytes()
            .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')));
    }
});
