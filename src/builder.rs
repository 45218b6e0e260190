//! Graph construction from reads.
//!
//! Building happens in two halves: a parallel counting pass that shards
//! k-mer extraction across reads into a shared [`DashMap`], and a serial
//! fold of the count map into the [`DeBruijnGraph`]. Edge weights are
//! commutative sums, so the order reads are processed in never affects the
//! final graph.

use std::{
    hash::BuildHasherDefault,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

use bytes::Bytes;
use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::FxHasher;
use tracing::{debug, warn};

use crate::{
    error::AssemblyError,
    graph::DeBruijnGraph,
    kmer::{kmer_windows, KmerSize},
    read::Read,
};

/// A custom `DashMap` w/ `FxHasher`, keyed by exact k-mer bytes.
type DashFx = DashMap<Bytes, u32, BuildHasherDefault<FxHasher>>;

/// What to do with a read shorter than k.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortReadPolicy {
    /// Abort the run with [`AssemblyError::KmerExceedsRead`].
    #[default]
    Error,
    /// Skip the read and count it in [`BuildStats::short_reads_skipped`].
    Skip,
}

/// Counters accumulated while building the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Reads consumed.
    pub reads: usize,
    /// Reads shorter than k skipped under [`ShortReadPolicy::Skip`].
    pub short_reads_skipped: usize,
    /// Total k-mer occurrences counted. Equals the final graph's total
    /// edge weight.
    pub kmer_occurrences: u64,
}

/// Builds a [`DeBruijnGraph`] from a collection of validated reads.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    k: KmerSize,
    short_reads: ShortReadPolicy,
}

impl GraphBuilder {
    /// Creates a builder for the given k-mer size.
    pub fn new(k: KmerSize) -> Self {
        Self {
            k,
            short_reads: ShortReadPolicy::default(),
        }
    }

    /// Sets the policy for reads shorter than k.
    #[must_use]
    pub fn short_reads(mut self, policy: ShortReadPolicy) -> Self {
        self.short_reads = policy;
        self
    }

    /// Consumes the reads and produces the completed graph.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::KmerExceedsRead`] for a read shorter than k
    /// under [`ShortReadPolicy::Error`].
    pub fn build<I>(&self, reads: I) -> Result<(DeBruijnGraph, BuildStats), AssemblyError>
    where
        I: IntoIterator<Item = Read>,
    {
        let reads: Vec<Read> = reads.into_iter().collect();
        let counts: DashFx = DashMap::with_hasher(BuildHasherDefault::default());
        let occurrences = AtomicU64::new(0);
        let skipped = AtomicUsize::new(0);

        reads
            .par_iter()
            .try_for_each(|read| self.count_read(read, &counts, &occurrences, &skipped))?;

        let mut graph = DeBruijnGraph::new();
        for (kmer, count) in counts {
            let kmer = std::str::from_utf8(&kmer).map_err(|_| AssemblyError::SequenceParse {
                details: "non-UTF-8 k-mer".to_string(),
            })?;
            graph.add_kmer(kmer, count);
        }

        let stats = BuildStats {
            reads: reads.len(),
            short_reads_skipped: skipped.load(Ordering::Relaxed),
            kmer_occurrences: occurrences.load(Ordering::Relaxed),
        };
        debug!(
            reads = stats.reads,
            kmer_occurrences = stats.kmer_occurrences,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built de bruijn graph"
        );
        Ok((graph, stats))
    }

    fn count_read(
        &self,
        read: &Read,
        counts: &DashFx,
        occurrences: &AtomicU64,
        skipped: &AtomicUsize,
    ) -> Result<(), AssemblyError> {
        let windows = match kmer_windows(read, self.k) {
            Ok(windows) => windows,
            Err(err @ AssemblyError::KmerExceedsRead { .. }) => {
                return match self.short_reads {
                    ShortReadPolicy::Error => Err(err),
                    ShortReadPolicy::Skip => {
                        warn!(read_len = read.len(), k = %self.k, "skipping short read");
                        skipped.fetch_add(1, Ordering::Relaxed);
                        Ok(())
                    }
                }
            }
            Err(err) => return Err(err),
        };

        occurrences.fetch_add(windows.len() as u64, Ordering::Relaxed);
        for kmer in windows {
            *counts.entry(kmer).or_insert(0) += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(seqs: &[&str]) -> Vec<Read> {
        seqs.iter().map(|s| Read::new(s).unwrap()).collect()
    }

    fn k(k: usize) -> KmerSize {
        KmerSize::new(k).unwrap()
    }

    #[test]
    fn builds_graph_from_two_overlapping_reads() {
        let (graph, stats) = GraphBuilder::new(k(3))
            .build(reads(&["ATGCGT", "TGCGTA"]))
            .unwrap();

        let mut nodes = graph.nodes_sorted();
        nodes.sort_unstable();
        assert_eq!(nodes, vec!["AT", "CG", "GC", "GT", "TA", "TG"]);

        assert_eq!(graph.weight("AT", "TG"), Some(1));
        assert_eq!(graph.weight("TG", "GC"), Some(2));
        assert_eq!(graph.weight("GC", "CG"), Some(2));
        assert_eq!(graph.weight("CG", "GT"), Some(2));
        assert_eq!(graph.weight("GT", "TA"), Some(1));
        assert_eq!(graph.edge_count(), 5);

        assert_eq!(stats.reads, 2);
        assert_eq!(stats.kmer_occurrences, 8);
    }

    #[test]
    fn weight_sum_equals_kmer_occurrences() {
        let (graph, stats) = GraphBuilder::new(k(3))
            .build(reads(&["TCAGAGA", "GATTACA", "ACGTACGT"]))
            .unwrap();
        assert_eq!(graph.total_weight(), stats.kmer_occurrences);
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let (graph, stats) = GraphBuilder::new(k(3)).build(Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(stats.reads, 0);
        assert_eq!(stats.kmer_occurrences, 0);
    }

    #[test]
    fn short_read_errors_by_default() {
        let err = GraphBuilder::new(k(5))
            .build(reads(&["ACGTACGT", "ACG"]))
            .unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::KmerExceedsRead { k: 5, read_len: 3 }
        ));
    }

    #[test]
    fn short_read_skipped_under_skip_policy() {
        let (graph, stats) = GraphBuilder::new(k(5))
            .short_reads(ShortReadPolicy::Skip)
            .build(reads(&["ACGTACGT", "ACG"]))
            .unwrap();
        assert_eq!(stats.short_reads_skipped, 1);
        assert_eq!(stats.kmer_occurrences, 4);
        assert_eq!(graph.total_weight(), 4);
    }

    #[test]
    fn read_order_does_not_affect_graph() {
        let (forward, _) = GraphBuilder::new(k(3))
            .build(reads(&["ATGCGT", "TGCGTA"]))
            .unwrap();
        let (reversed, _) = GraphBuilder::new(k(3))
            .build(reads(&["TGCGTA", "ATGCGT"]))
            .unwrap();
        assert_eq!(forward.nodes_sorted(), reversed.nodes_sorted());
        assert_eq!(forward.total_weight(), reversed.total_weight());
        for node in forward.nodes_sorted() {
            for succ in forward.successors(&node) {
                assert_eq!(forward.weight(&node, succ), reversed.weight(&node, succ));
            }
        }
    }
}
