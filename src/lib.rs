//! `rustig` assembles short DNA reads into contigs with a weighted
//! De Bruijn graph.
//!
//! Reads are decomposed into overlapping k-mers; each k-mer contributes
//! one weighted edge between its (k-1)-mer prefix and suffix. The graph
//! is simplified by clipping low-weight tips and popping bubbles, then
//! decomposed into maximal non-branching paths, each of which spells a
//! contig.
//!
//! ```
//! use rustig::{Assembler, Read};
//!
//! let reads = vec![Read::new("ATGCGT")?, Read::new("TGCGTA")?];
//! let assembly = Assembler::new().k(3)?.assemble(reads)?;
//! let contigs: Vec<&str> = assembly.contigs.iter().map(|c| c.sequence()).collect();
//! assert_eq!(contigs, ["ATGCGTA"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assembler;
pub mod builder;
pub mod cli;
pub mod contig;
pub mod error;
pub mod format;
pub mod graph;
pub mod kmer;
pub mod read;
mod reader;
pub mod run;
pub mod simplify;
pub mod writer;

pub use assembler::{Assembler, Assembly, AssemblyStats};
pub use builder::{BuildStats, GraphBuilder, ShortReadPolicy};
pub use contig::{extract_contigs, Contig};
pub use error::{AssemblyError, KmerSizeError, MalformedReadError};
pub use format::SequenceFormat;
pub use graph::DeBruijnGraph;
pub use kmer::{kmer_windows, KmerSize, DEFAULT_K};
pub use read::Read;
pub use simplify::{simplify, SimplifyOptions, SimplifyStats};
pub use writer::ContigFormat;
