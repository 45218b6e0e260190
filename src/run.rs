//! File-to-file assembly entry points.
//!
//! Thin glue over [`Assembler`]: read a FASTA/FASTQ file, assemble, write
//! contigs. The core pipeline never touches the filesystem itself.

use std::{fmt::Debug, path::Path};

use crate::{
    assembler::{Assembler, Assembly},
    error::AssemblyError,
    format::SequenceFormat,
    writer::{write_contigs_to, ContigFormat},
};

/// Assembles the reads in a file with default settings.
///
/// # Errors
///
/// Returns [`AssemblyError::InvalidKmerSize`] if `k` is even or below 3,
/// and any read or parse error from the input file.
pub fn assemble_file<P>(path: P, k: usize) -> Result<Assembly, AssemblyError>
where
    P: AsRef<Path> + Debug,
{
    Assembler::new().k(k)?.assemble_file(path)
}

/// Assembles `input` and writes FASTA contigs to `output` (stdout if
/// `None`).
///
/// # Errors
///
/// Returns any error from assembly or from writing the output.
pub fn run<P>(input: P, output: Option<&Path>, k: usize) -> Result<(), AssemblyError>
where
    P: AsRef<Path> + Debug,
{
    let assembly = assemble_file(input, k)?;
    write_contigs_to(output, &assembly.contigs, ContigFormat::Fasta)
}

/// Assembles `input` with a configured [`Assembler`] and writes contigs in
/// the chosen format.
///
/// # Errors
///
/// Returns any error from assembly or from writing the output.
pub fn run_with_options<P>(
    input: P,
    output: Option<&Path>,
    assembler: &Assembler,
    input_format: SequenceFormat,
    output_format: ContigFormat,
) -> Result<(), AssemblyError>
where
    P: AsRef<Path> + Debug,
{
    let assembly = assembler.assemble_file_with_format(input, input_format)?;
    write_contigs_to(output, &assembly.contigs, output_format)
}
