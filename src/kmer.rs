//! K-mer size validation and k-mer window extraction.
//!
//! [`kmer_windows`] decomposes a read of length `L` into its `L - k + 1`
//! overlapping k-mers, left to right. Extraction is pure: counting and
//! aggregation across reads belong to the graph builder.

use std::fmt;

use bytes::Bytes;

use crate::{
    error::{AssemblyError, KmerSizeError},
    read::Read,
};

/// Default k-mer size used when none is configured.
pub const DEFAULT_K: usize = 21;

/// A validated k-mer size.
///
/// Assembly k-mers must be odd and at least [`KmerSize::MIN`] bases long;
/// oddness avoids self-palindromic ambiguity in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KmerSize(usize);

impl KmerSize {
    /// Minimum supported k-mer size.
    pub const MIN: usize = 3;

    /// Validates and wraps a k-mer size.
    ///
    /// # Errors
    ///
    /// Returns [`KmerSizeError`] if `k` is even or below [`KmerSize::MIN`].
    pub fn new(k: usize) -> Result<Self, KmerSizeError> {
        if k < Self::MIN {
            return Err(KmerSizeError::TooSmall(k));
        }
        if k % 2 == 0 {
            return Err(KmerSizeError::Even(k));
        }
        Ok(Self(k))
    }

    /// The underlying size.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for KmerSize {
    fn default() -> Self {
        Self(DEFAULT_K)
    }
}

impl fmt::Display for KmerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<usize> for KmerSize {
    type Error = KmerSizeError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

/// Returns the k-mer windows of `read`, in left-to-right order.
///
/// The iterator is lazy and cheap to restart: calling this function again
/// yields a fresh pass over the same read.
///
/// # Errors
///
/// Returns [`AssemblyError::KmerExceedsRead`] if the read is shorter than `k`.
pub fn kmer_windows(read: &Read, k: KmerSize) -> Result<KmerWindows, AssemblyError> {
    let k = k.get();
    if k > read.len() {
        return Err(AssemblyError::KmerExceedsRead {
            k,
            read_len: read.len(),
        });
    }
    Ok(KmerWindows {
        seq: read.bytes(),
        k,
        offset: 0,
    })
}

/// Iterator over the overlapping k-mers of a single read.
///
/// Yields shared [`Bytes`] slices into the read, so no sequence data is
/// copied per window.
#[derive(Debug, Clone)]
pub struct KmerWindows {
    seq: Bytes,
    k: usize,
    offset: usize,
}

impl Iterator for KmerWindows {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset + self.k > self.seq.len() {
            return None;
        }
        let window = self.seq.slice(self.offset..self.offset + self.k);
        self.offset += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.seq.len() + 1).saturating_sub(self.k + self.offset);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for KmerWindows {}
