//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::{
    format::SequenceFormat,
    kmer::{KmerSize, DEFAULT_K},
    simplify::{DEFAULT_MAX_BUBBLE_HOPS, DEFAULT_MAX_ROUNDS, DEFAULT_MAX_TIP_HOPS},
    writer::ContigFormat,
};

/// A De Bruijn graph assembler for short DNA reads.
#[derive(Parser, Debug)]
#[command(name = "rustig")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Path to the input read file (FASTQ or FASTA)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to write contigs (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// K-mer size (odd, at least 3)
    #[arg(short, long, default_value_t = DEFAULT_K, value_parser = parse_k)]
    pub k: usize,

    /// Input format
    #[arg(long, value_enum, default_value = "auto")]
    pub input_format: SequenceFormat,

    /// Output format
    #[arg(short, long, value_enum, default_value = "fasta")]
    pub format: ContigFormat,

    /// Drop contigs shorter than this many bases
    #[arg(long, default_value = "0")]
    pub min_len: usize,

    /// Skip reads shorter than k instead of aborting
    #[arg(long)]
    pub skip_short_reads: bool,

    /// Longest dead-end arm removed as a tip, in edges
    #[arg(long, default_value_t = DEFAULT_MAX_TIP_HOPS)]
    pub max_tip_hops: usize,

    /// Longest bubble arm considered, in edges
    #[arg(long, default_value_t = DEFAULT_MAX_BUBBLE_HOPS)]
    pub max_bubble_hops: usize,

    /// Cap on simplification passes
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Suppress informational output (only write contigs)
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    KmerSize::new(k).map_err(|e| e.to_string())?;
    Ok(k)
}
