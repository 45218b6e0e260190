//! Raw sequence ingestion.
//!
//! Thin wrapper over the `bio` FASTA/FASTQ readers. Only the sequence line
//! of each record is consumed; headers and quality scores are ignored.
//! Validation of the bases happens downstream, so a record containing
//! ambiguous bases is still read here and discarded later.

use std::{fmt::Debug, fs::File, io::BufReader, path::Path};

use bio::io::{fasta, fastq};
use bytes::Bytes;

use crate::{error::AssemblyError, format::SequenceFormat};

/// Check if a path has a gzip extension (.gz).
#[cfg(feature = "gzip")]
fn is_gzip_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false)
}

/// Reads every record's sequence bytes from a FASTA or FASTQ file.
pub(crate) fn read_sequences<P: AsRef<Path> + Debug>(
    path: P,
    format: SequenceFormat,
) -> Result<Vec<Bytes>, AssemblyError> {
    let resolved = format.resolve(Some(path.as_ref()));
    let file = File::open(path.as_ref()).map_err(|source| AssemblyError::SequenceRead {
        source,
        path: path.as_ref().to_path_buf(),
    })?;

    #[cfg(feature = "gzip")]
    if is_gzip_path(&path) {
        let decoder = flate2::read::GzDecoder::new(file);
        return parse_records(BufReader::new(decoder), resolved);
    }

    parse_records(BufReader::new(file), resolved)
}

fn parse_records<R: std::io::Read>(
    reader: R,
    format: SequenceFormat,
) -> Result<Vec<Bytes>, AssemblyError> {
    let mut sequences = Vec::new();
    match format {
        SequenceFormat::Fasta => {
            for record in fasta::Reader::new(reader).records() {
                let record = record.map_err(|e| AssemblyError::SequenceParse {
                    details: e.to_string(),
                })?;
                sequences.push(Bytes::copy_from_slice(record.seq()));
            }
        }
        SequenceFormat::Fastq | SequenceFormat::Auto => {
            for record in fastq::Reader::new(reader).records() {
                let record = record.map_err(|e| AssemblyError::SequenceParse {
                    details: e.to_string(),
                })?;
                sequences.push(Bytes::copy_from_slice(record.seq()));
            }
        }
    }
    Ok(sequences)
}
