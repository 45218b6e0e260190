//! The assembly pipeline and its fluent configuration API.
//!
//! Data flows strictly forward: reads -> k-mers -> graph -> simplified
//! graph -> contigs. The graph is owned by the pipeline and mutated in
//! place during simplification; extraction treats it as read-only.
//!
//! # Example
//!
//! ```rust
//! use rustig::{Assembler, Read};
//!
//! let reads = vec![Read::new("ATGCGT")?, Read::new("TGCGTA")?];
//! let assembly = Assembler::new().k(3)?.assemble(reads)?;
//! assert_eq!(assembly.contigs.len(), 1);
//! assert_eq!(assembly.contigs[0].sequence(), "ATGCGTA");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{fmt::Debug, path::Path};

use tracing::{info, warn};

use crate::{
    builder::{GraphBuilder, ShortReadPolicy},
    contig::{extract_contigs, Contig},
    error::{AssemblyError, KmerSizeError},
    format::SequenceFormat,
    kmer::KmerSize,
    read::Read,
    reader,
    simplify::{simplify, SimplifyOptions},
};

/// The result of an assembly run.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// Extracted contigs, in deterministic discovery order.
    pub contigs: Vec<Contig>,
    /// Counters describing the run.
    pub stats: AssemblyStats,
}

/// Counters describing an assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Reads fed into the graph builder.
    pub reads: usize,
    /// Reads discarded for containing a base outside {A, C, G, T}.
    pub malformed_reads_skipped: usize,
    /// Reads shorter than k skipped under [`ShortReadPolicy::Skip`].
    pub short_reads_skipped: usize,
    /// Total k-mer occurrences counted across all reads.
    pub kmer_occurrences: u64,
    /// Graph nodes before simplification.
    pub graph_nodes: usize,
    /// Graph edges before simplification.
    pub graph_edges: usize,
    /// Tip arms removed during simplification.
    pub tips_removed: usize,
    /// Bubbles popped during simplification.
    pub bubbles_removed: usize,
}

/// A builder for configuring and running assemblies.
///
/// Defaults: k = 21, default [`SimplifyOptions`], reads shorter than k
/// abort the run, and no contig length filter.
///
/// # Example
///
/// ```rust,no_run
/// use rustig::{Assembler, SimplifyOptions};
///
/// let assembly = Assembler::new()
///     .k(31)?
///     .simplify_options(SimplifyOptions::default())
///     .min_len(100)
///     .assemble_file("reads.fq")?;
///
/// for contig in &assembly.contigs {
///     println!("{} ({} bp)", contig.sequence(), contig.len());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Assembler {
    k: KmerSize,
    simplify: SimplifyOptions,
    short_reads: ShortReadPolicy,
    min_len: usize,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Creates an assembler with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: KmerSize::default(),
            simplify: SimplifyOptions::default(),
            short_reads: ShortReadPolicy::default(),
            min_len: 0,
        }
    }

    /// Sets the k-mer size.
    ///
    /// # Errors
    ///
    /// Returns [`KmerSizeError`] if `k` is even or below 3.
    pub fn k(mut self, k: usize) -> Result<Self, KmerSizeError> {
        self.k = KmerSize::new(k)?;
        Ok(self)
    }

    /// Sets the k-mer size from a pre-validated [`KmerSize`].
    #[must_use]
    pub fn k_validated(mut self, k: KmerSize) -> Self {
        self.k = k;
        self
    }

    /// Sets the simplification heuristics.
    #[must_use]
    pub fn simplify_options(mut self, options: SimplifyOptions) -> Self {
        self.simplify = options;
        self
    }

    /// Sets the policy for reads shorter than k.
    #[must_use]
    pub fn short_reads(mut self, policy: ShortReadPolicy) -> Self {
        self.short_reads = policy;
        self
    }

    /// Drops contigs shorter than `min_len` bases from the output.
    #[must_use]
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Assembles a collection of validated reads.
    ///
    /// An empty read collection is not an error: it yields an empty contig
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::KmerExceedsRead`] for a read shorter than
    /// k under the default short-read policy.
    pub fn assemble<I>(&self, reads: I) -> Result<Assembly, AssemblyError>
    where
        I: IntoIterator<Item = Read>,
    {
        let (mut graph, build_stats) = GraphBuilder::new(self.k)
            .short_reads(self.short_reads)
            .build(reads)?;
        let graph_nodes = graph.node_count();
        let graph_edges = graph.edge_count();

        let simplify_stats = simplify(&mut graph, &self.simplify);

        let mut contigs = extract_contigs(&graph);
        if self.min_len > 0 {
            contigs.retain(|contig| contig.len() >= self.min_len);
        }
        info!(
            reads = build_stats.reads,
            nodes = graph_nodes,
            edges = graph_edges,
            tips_removed = simplify_stats.tips_removed,
            bubbles_removed = simplify_stats.bubbles_removed,
            contigs = contigs.len(),
            "assembly complete"
        );

        Ok(Assembly {
            contigs,
            stats: AssemblyStats {
                reads: build_stats.reads,
                malformed_reads_skipped: 0,
                short_reads_skipped: build_stats.short_reads_skipped,
                kmer_occurrences: build_stats.kmer_occurrences,
                graph_nodes,
                graph_edges,
                tips_removed: simplify_stats.tips_removed,
                bubbles_removed: simplify_stats.bubbles_removed,
            },
        })
    }

    /// Assembles raw sequences, discarding malformed reads.
    ///
    /// Reads containing a base outside {A, C, G, T} are dropped with a
    /// warning and counted in
    /// [`AssemblyStats::malformed_reads_skipped`]; a single bad read never
    /// sinks the run.
    pub fn assemble_sequences<I, S>(&self, sequences: I) -> Result<Assembly, AssemblyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut reads = Vec::new();
        let mut malformed = 0;
        for (index, sequence) in sequences.into_iter().enumerate() {
            match Read::new(sequence) {
                Ok(read) => reads.push(read),
                Err(err) => {
                    warn!(read = index, %err, "discarding malformed read");
                    malformed += 1;
                }
            }
        }

        let mut assembly = self.assemble(reads)?;
        assembly.stats.malformed_reads_skipped = malformed;
        Ok(assembly)
    }

    /// Assembles the reads in a FASTA/FASTQ file, auto-detecting the format
    /// from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::SequenceRead`] if the file cannot be opened
    /// and [`AssemblyError::SequenceParse`] if a record is malformed at the
    /// file-format level.
    pub fn assemble_file<P>(&self, path: P) -> Result<Assembly, AssemblyError>
    where
        P: AsRef<Path> + Debug,
    {
        self.assemble_file_with_format(path, SequenceFormat::Auto)
    }

    /// Assembles the reads in a file of the given format.
    pub fn assemble_file_with_format<P>(
        &self,
        path: P,
        format: SequenceFormat,
    ) -> Result<Assembly, AssemblyError>
    where
        P: AsRef<Path> + Debug,
    {
        let sequences = reader::read_sequences(path, format)?;
        self.assemble_sequences(sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(seqs: &[&str]) -> Vec<Read> {
        seqs.iter().map(|s| Read::new(s).unwrap()).collect()
    }

    #[test]
    fn two_overlapping_reads_assemble_into_one_contig() {
        let assembly = Assembler::new()
            .k(3)
            .unwrap()
            .assemble(reads(&["ATGCGT", "TGCGTA"]))
            .unwrap();
        assert_eq!(assembly.contigs.len(), 1);
        assert_eq!(assembly.contigs[0].sequence(), "ATGCGTA");
        assert_eq!(assembly.stats.kmer_occurrences, 8);
        assert_eq!(assembly.stats.graph_nodes, 6);
        assert_eq!(assembly.stats.graph_edges, 5);
    }

    #[test]
    fn empty_input_yields_empty_contig_list() {
        let assembly = Assembler::new().k(3).unwrap().assemble(Vec::new()).unwrap();
        assert!(assembly.contigs.is_empty());
        assert_eq!(assembly.stats, AssemblyStats::default());
    }

    #[test]
    fn malformed_read_is_discarded_and_counted() {
        let assembly = Assembler::new()
            .k(3)
            .unwrap()
            .assemble_sequences(["ATGCGT", "TGNGTA", "TGCGTA"])
            .unwrap();
        assert_eq!(assembly.stats.malformed_reads_skipped, 1);
        assert_eq!(assembly.stats.reads, 2);
        assert_eq!(assembly.contigs[0].sequence(), "ATGCGTA");
    }

    #[test]
    fn invalid_k_is_rejected() {
        assert_eq!(Assembler::new().k(4).unwrap_err(), KmerSizeError::Even(4));
        assert_eq!(
            Assembler::new().k(1).unwrap_err(),
            KmerSizeError::TooSmall(1)
        );
    }

    #[test]
    fn min_len_filters_short_contigs() {
        // Fork produces contigs of length 4, 3, and 3
        let assembly = Assembler::new()
            .k(3)
            .unwrap()
            .min_len(4)
            .assemble(reads(&["TCAG", "CAGC", "CAGT"]))
            .unwrap();
        assert!(assembly.contigs.iter().all(|c| c.len() >= 4));
    }

    #[test]
    fn bubble_from_one_base_error_is_resolved() {
        // Three reads support CATGGA; one read mis-calls the fourth base.
        let assembly = Assembler::new()
            .k(3)
            .unwrap()
            .assemble(reads(&["CATGGA", "CATGGA", "CATGGA", "CATCGA"]))
            .unwrap();
        assert_eq!(assembly.stats.bubbles_removed, 1);
        assert_eq!(assembly.contigs.len(), 1);
        assert_eq!(assembly.contigs[0].sequence(), "CATGGA");
    }
}
