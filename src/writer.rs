//! Contig output.
//!
//! Each contig is written with its length in the chosen format. FASTA output
//! wraps sequence lines at 80 columns.

use std::{
    fs::File,
    io::{stdout, BufWriter, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::Serialize;

use crate::{contig::Contig, error::AssemblyError};

const FASTA_LINE_WIDTH: usize = 80;

/// Output format for contigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ContigFormat {
    /// FASTA with a `>contig_{n} len={length}` header per contig.
    #[default]
    Fasta,
    /// Tab-separated values (`id`, `length`, `sequence`).
    Tsv,
    /// JSON array format.
    Json,
}

impl std::fmt::Display for ContigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fasta => write!(f, "fasta"),
            Self::Tsv => write!(f, "tsv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A contig with its identifier and length, used for JSON serialization.
#[derive(Serialize)]
struct ContigRecord<'a> {
    id: String,
    length: usize,
    sequence: &'a str,
}

/// Writes contigs to `writer` in the given format.
pub fn write_contigs<W: Write>(
    writer: &mut W,
    contigs: &[Contig],
    format: ContigFormat,
) -> Result<(), AssemblyError> {
    match format {
        ContigFormat::Fasta => {
            for (i, contig) in contigs.iter().enumerate() {
                writeln!(writer, ">contig_{i} len={}", contig.len())?;
                for chunk in contig.sequence().as_bytes().chunks(FASTA_LINE_WIDTH) {
                    writer.write_all(chunk)?;
                    writeln!(writer)?;
                }
            }
        }
        ContigFormat::Tsv => {
            for (i, contig) in contigs.iter().enumerate() {
                writeln!(writer, "contig_{i}\t{}\t{}", contig.len(), contig.sequence())?;
            }
        }
        ContigFormat::Json => {
            let records: Vec<ContigRecord<'_>> = contigs
                .iter()
                .enumerate()
                .map(|(i, contig)| ContigRecord {
                    id: format!("contig_{i}"),
                    length: contig.len(),
                    sequence: contig.sequence(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &records)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes contigs to a file, or to stdout when `path` is `None`.
pub fn write_contigs_to(
    path: Option<&Path>,
    contigs: &[Contig],
    format: ContigFormat,
) -> Result<(), AssemblyError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| AssemblyError::Write { source })?;
            write_contigs(&mut BufWriter::new(file), contigs, format)
        }
        None => write_contigs(&mut BufWriter::new(stdout()), contigs, format),
    }
}
