//! Error types for rustig.
//!
//! This module provides exhaustive, strongly-typed errors for all operations
//! in the library, enabling precise error handling and informative messages.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during assembly.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// K-mer size is even or below the minimum.
    #[error(transparent)]
    InvalidKmerSize(#[from] KmerSizeError),

    /// K-mer size exceeds the length of a read.
    #[error("k-mer size {k} exceeds read length {read_len}")]
    KmerExceedsRead { k: usize, read_len: usize },

    /// Failed to read sequence file.
    #[error("failed to read sequence file '{path}': {source}")]
    SequenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Failed to parse sequence record.
    #[error("failed to parse sequence record: {details}")]
    SequenceParse { details: String },

    /// Failed to write contig output.
    #[error("failed to write contigs: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl From<std::io::Error> for AssemblyError {
    fn from(source: std::io::Error) -> Self {
        Self::Write { source }
    }
}

/// Error for an invalid k-mer size.
///
/// Assembly k-mers must be odd (to avoid self-palindromic ambiguity in the
/// graph) and at least 3 bases long.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum KmerSizeError {
    /// K-mer size is below the minimum of 3.
    #[error("k-mer size {0} is too small: must be at least 3")]
    TooSmall(usize),

    /// K-mer size is even.
    #[error("k-mer size {0} must be odd")]
    Even(usize),
}

/// Error for a read containing a base outside {A, C, G, T}.
///
/// Malformed reads are recoverable: the pipeline discards the offending read
/// and continues, surfacing a count of discarded reads to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedReadError {
    /// The invalid byte value.
    pub base: u8,
    /// Position of the invalid byte in the read.
    pub position: usize,
}

impl std::fmt::Display for MalformedReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.base.is_ascii_graphic() || self.base == b' ' {
            write!(
                f,
                "invalid base '{}' (0x{:02x}) at position {}",
                self.base as char, self.base, self.position
            )
        } else {
            write!(
                f,
                "invalid base 0x{:02x} at position {}",
                self.base, self.position
            )
        }
    }
}

impl std::error::Error for MalformedReadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kmer_size_error_display() {
        assert_eq!(
            KmerSizeError::TooSmall(1).to_string(),
            "k-mer size 1 is too small: must be at least 3"
        );
        assert_eq!(
            KmerSizeError::Even(22).to_string(),
            "k-mer size 22 must be odd"
        );
    }

    #[test]
    fn malformed_read_error_display() {
        let err = MalformedReadError {
            base: b'N',
            position: 5,
        };
        assert_eq!(err.to_string(), "invalid base 'N' (0x4e) at position 5");
    }

    #[test]
    fn malformed_read_error_display_non_graphic() {
        let err = MalformedReadError {
            base: 0x07,
            position: 0,
        };
        assert_eq!(err.to_string(), "invalid base 0x07 at position 0");
    }

    #[test]
    fn assembly_error_from_kmer_size_error() {
        let err: AssemblyError = KmerSizeError::Even(4).into();
        assert!(matches!(
            err,
            AssemblyError::InvalidKmerSize(KmerSizeError::Even(4))
        ));
    }

    #[test]
    fn kmer_exceeds_read_display() {
        let err = AssemblyError::KmerExceedsRead { k: 21, read_len: 10 };
        assert_eq!(err.to_string(), "k-mer size 21 exceeds read length 10");
    }
}
