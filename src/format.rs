//! Input format selection.

use std::path::Path;

use clap::ValueEnum;

/// Input sequence file format, detected from the extension under `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SequenceFormat {
    /// Detect from the file extension, `.gz` stripped first. Unknown
    /// extensions fall back to FASTQ, the usual short-read format.
    #[default]
    Auto,
    /// FASTA (`.fa`, `.fasta`, `.fna`).
    Fasta,
    /// FASTQ (`.fq`, `.fastq`).
    Fastq,
}

impl SequenceFormat {
    /// Resolves `Auto` against a file path; explicit formats pass through.
    #[must_use]
    pub fn resolve(self, path: Option<&Path>) -> Self {
        match self {
            Self::Auto => path.map_or(Self::Fastq, Self::from_extension),
            other => other,
        }
    }

    /// Detects the format from a path's extension.
    ///
    /// ```
    /// use rustig::SequenceFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(SequenceFormat::from_extension(Path::new("reads.fq.gz")), SequenceFormat::Fastq);
    /// assert_eq!(SequenceFormat::from_extension(Path::new("genome.fna")), SequenceFormat::Fasta);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Path) -> Self {
        let ext = match extension_of(path).as_deref() {
            Some("gz") => path
                .file_stem()
                .map(Path::new)
                .and_then(|stem| extension_of(stem)),
            other => other.map(String::from),
        };
        match ext.as_deref() {
            Some("fa" | "fasta" | "fna") => Self::Fasta,
            _ => Self::Fastq,
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_lowercase)
}

impl std::fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Fasta => "fasta",
            Self::Fastq => "fastq",
        };
        f.write_str(name)
    }
}
