//! Contig reconstruction from the simplified graph.
//!
//! Contigs correspond to maximal non-branching paths: runs of edges whose
//! interior nodes all have in-degree 1 and out-degree 1. The decomposition
//! covers every edge exactly once; edges unreachable from a branching or
//! terminal node lie on isolated cycles, and each cycle is emitted as a
//! single closed path starting at its lexicographically smallest node.
//!
//! Extraction treats the graph as read-only and is deterministic: nodes and
//! successors are visited in lexicographic order.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::graph::DeBruijnGraph;

/// A reconstructed contiguous sequence.
///
/// Built from a path by taking the first node in full, then the last
/// character of each subsequent node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contig {
    sequence: String,
}

impl Contig {
    pub(crate) fn from_path(path: &[String]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let mut sequence = first.clone();
        for node in rest {
            sequence.extend(node.chars().next_back());
        }
        Some(Self { sequence })
    }

    /// The reconstructed sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Sequence length in bases.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the contig has no bases.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Consumes the contig, returning the owned sequence.
    pub fn into_string(self) -> String {
        self.sequence
    }
}

impl fmt::Display for Contig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}

/// Enumerates every maximal non-branching path and reconstructs its contig.
///
/// Each edge is covered exactly once across the returned contigs. Output
/// order follows path discovery order, which is fixed by lexicographic
/// node iteration.
pub fn extract_contigs(graph: &DeBruijnGraph) -> Vec<Contig> {
    let mut contigs = Vec::new();
    let mut used: FxHashSet<(String, String)> = FxHashSet::default();

    // Paths anchored at a branching or terminal node.
    for node in graph.nodes_sorted() {
        if is_internal(graph, &node) {
            continue;
        }
        for succ in graph.successors(&node) {
            let mut path = vec![node.clone(), succ.to_string()];
            used.insert((node.clone(), succ.to_string()));
            let mut cur = succ.to_string();
            while is_internal(graph, &cur) {
                let Some(next) = graph.successors(&cur).first().map(ToString::to_string) else {
                    break;
                };
                used.insert((cur.clone(), next.clone()));
                path.push(next.clone());
                cur = next;
            }
            contigs.extend(Contig::from_path(&path));
        }
    }

    // Whatever remains is an isolated cycle of internal nodes. Starting at
    // the first unvisited node in sorted order pins the rotation.
    for node in graph.nodes_sorted() {
        if !is_internal(graph, &node) {
            continue;
        }
        let Some(first) = graph.successors(&node).first().map(ToString::to_string) else {
            continue;
        };
        if used.contains(&(node.clone(), first)) {
            continue;
        }
        let mut path = vec![node.clone()];
        let mut cur = node.clone();
        loop {
            let Some(next) = graph.successors(&cur).first().map(ToString::to_string) else {
                break;
            };
            used.insert((cur.clone(), next.clone()));
            path.push(next.clone());
            cur = next;
            if cur == node {
                break;
            }
        }
        contigs.extend(Contig::from_path(&path));
    }

    contigs
}

/// A node interior to a non-branching run.
fn is_internal(graph: &DeBruijnGraph, node: &str) -> bool {
    graph.in_degree(node) == 1 && graph.out_degree(node) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from_kmers(kmers: &[&str]) -> DeBruijnGraph {
        let mut graph = DeBruijnGraph::new();
        for kmer in kmers {
            graph.add_kmer(kmer, 1);
        }
        graph
    }

    #[test]
    fn linear_path_yields_one_contig() {
        let graph = graph_from_kmers(&["ATG", "TGC", "GCG", "CGT", "GTA"]);
        let contigs = extract_contigs(&graph);
        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].sequence(), "ATGCGTA");
        assert_eq!(contigs[0].len(), 7);
    }

    #[test]
    fn fork_yields_one_contig_per_branch() {
        // TC -> CA -> AG, then AG -> GC and AG -> GT
        let graph = graph_from_kmers(&["TCA", "CAG", "AGC", "AGT"]);
        let contigs = extract_contigs(&graph);
        assert_eq!(contigs.len(), 3);
        let sequences: Vec<String> =
            contigs.iter().map(|c| c.sequence().to_string()).collect();
        assert!(sequences.contains(&"TCAG".to_string()));
        assert!(sequences.contains(&"AGC".to_string()));
        assert!(sequences.contains(&"AGT".to_string()));
    }

    #[test]
    fn every_edge_covered_exactly_once() {
        let graph = graph_from_kmers(&["TCA", "CAG", "AGA", "GAG", "AGC"]);
        let contigs = extract_contigs(&graph);
        let total_edges_covered: usize = contigs.iter().map(|c| c.len() - 2).sum();
        assert_eq!(total_edges_covered, graph.edge_count());
    }

    #[test]
    fn isolated_cycle_emitted_once() {
        // AB -> BA -> AB form a 2-cycle with no entry or exit
        let mut graph = DeBruijnGraph::new();
        graph.add_edge("AB", "BA", 1);
        graph.add_edge("BA", "AB", 1);
        let contigs = extract_contigs(&graph);
        assert_eq!(contigs.len(), 1);
        // Starts at AB, the lexicographically smaller node on the cycle
        assert_eq!(contigs[0].sequence(), "ABAB");
    }

    #[test]
    fn empty_graph_yields_no_contigs() {
        let graph = DeBruijnGraph::new();
        assert!(extract_contigs(&graph).is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let graph = graph_from_kmers(&["TCA", "CAG", "AGC", "AGT", "GTC"]);
        let first = extract_contigs(&graph);
        let second = extract_contigs(&graph);
        assert_eq!(first, second);
    }
}
