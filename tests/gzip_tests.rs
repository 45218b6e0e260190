//! Tests for gzip compressed input support.

#![cfg(feature = "gzip")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use rustig::Assembler;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn assemble_from_gzip_file() {
    let assembly = Assembler::new()
        .k(3)
        .unwrap()
        .assemble_file(fixture_path("reads.fq.gz"))
        .expect("should assemble gzipped file");

    let contigs: Vec<&str> = assembly.contigs.iter().map(|c| c.sequence()).collect();
    assert_eq!(contigs, ["ATGCGTA"]);
}

#[test]
fn gzip_and_plain_produce_same_results() {
    let assembler = Assembler::new().k(3).unwrap();

    let plain = assembler
        .assemble_file(fixture_path("reads.fq"))
        .expect("should assemble plain file");
    let gzipped = assembler
        .assemble_file(fixture_path("reads.fq.gz"))
        .expect("should assemble gzipped file");

    let a: Vec<&str> = plain.contigs.iter().map(|c| c.sequence()).collect();
    let b: Vec<&str> = gzipped.contigs.iter().map(|c| c.sequence()).collect();
    assert_eq!(a, b);
    assert_eq!(plain.stats.reads, gzipped.stats.reads);
}
