//! Validated DNA reads.
//!
//! A [`Read`] owns an uppercase sequence over {A, C, G, T}. Construction
//! normalizes case and rejects any other byte with [`MalformedReadError`],
//! so downstream stages never see ambiguous bases.

use std::{fmt, str::FromStr};

use bytes::Bytes;

use crate::error::MalformedReadError;

/// An immutable, validated DNA read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Read(Bytes);

impl Read {
    /// Creates a read from raw sequence bytes.
    ///
    /// Lowercase input is normalized to uppercase. Any byte outside
    /// {A, C, G, T} after normalization is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedReadError`] identifying the first offending byte.
    pub fn new(seq: impl AsRef<[u8]>) -> Result<Self, MalformedReadError> {
        let seq = seq.as_ref();
        let mut normalized = Vec::with_capacity(seq.len());

        for (position, &base) in seq.iter().enumerate() {
            let upper = base.to_ascii_uppercase();
            if !is_base(upper) {
                return Err(MalformedReadError { base, position });
            }
            normalized.push(upper);
        }

        Ok(Self(Bytes::from(normalized)))
    }

    /// Number of bases in the read.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the read has no bases.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized sequence as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// A cheap shared handle to the underlying sequence bytes.
    pub(crate) fn bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl FromStr for Read {
    type Err = MalformedReadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Validated reads are always ASCII
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

const fn is_base(byte: u8) -> bool {
    matches!(byte, b'A' | b'C' | b'G' | b'T')
}
