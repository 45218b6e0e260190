//! The De Bruijn graph.
//!
//! Nodes are distinct (k-1)-mers; a directed edge connects a k-mer's prefix
//! node to its suffix node and carries a weight equal to the number of times
//! that exact k-mer was observed across all reads. Parallel observations of
//! the same k-mer coalesce into one edge with an accumulated weight.
//!
//! The representation is an adjacency map keyed by node string, giving O(1)
//! node and edge lookup, plus a mirrored predecessor map for O(1) in-degree.
//! Genomic k-mer graphs can run to hundreds of thousands of nodes, so both
//! maps use [`FxHasher`](rustc_hash::FxHasher).
//!
//! Hash maps have no stable iteration order, so every accessor that feeds a
//! traversal ([`nodes_sorted`](DeBruijnGraph::nodes_sorted),
//! [`successors`](DeBruijnGraph::successors),
//! [`predecessors`](DeBruijnGraph::predecessors), [`sources`](DeBruijnGraph::sources),
//! [`sinks`](DeBruijnGraph::sinks)) returns nodes in lexicographic order.
//! That fixed order is what makes simplification and contig extraction
//! deterministic.

use rustc_hash::{FxHashMap, FxHashSet};

/// A directed, weighted De Bruijn graph over (k-1)-mer nodes.
#[derive(Debug, Clone, Default)]
pub struct DeBruijnGraph {
    /// node -> successor -> edge weight
    out: FxHashMap<String, FxHashMap<String, u32>>,
    /// node -> set of predecessors (weights live on `out`)
    preds: FxHashMap<String, FxHashSet<String>>,
}

impl DeBruijnGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node if absent.
    pub fn add_node(&mut self, node: &str) {
        if !self.out.contains_key(node) {
            self.out.insert(node.to_string(), FxHashMap::default());
            self.preds.insert(node.to_string(), FxHashSet::default());
        }
    }

    /// Inserts an edge, accumulating `weight` onto any existing edge.
    ///
    /// Both endpoints are inserted as nodes if absent.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: u32) {
        self.add_node(from);
        self.add_node(to);
        if let Some(successors) = self.out.get_mut(from) {
            *successors.entry(to.to_string()).or_insert(0) += weight;
        }
        if let Some(predecessors) = self.preds.get_mut(to) {
            predecessors.insert(from.to_string());
        }
    }

    /// Records `weight` observations of a k-mer: an edge from its length
    /// k-1 prefix to its length k-1 suffix.
    pub fn add_kmer(&mut self, kmer: &str, weight: u32) {
        debug_assert!(kmer.len() >= 2, "k-mer must have at least two bases");
        self.add_edge(&kmer[..kmer.len() - 1], &kmer[1..], weight);
    }

    /// Returns `true` if `node` is present.
    pub fn contains_node(&self, node: &str) -> bool {
        self.out.contains_key(node)
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.out.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.out.values().map(FxHashMap::len).sum()
    }

    /// Sum of all edge weights, i.e. the total number of k-mer occurrences
    /// folded into the graph.
    pub fn total_weight(&self) -> u64 {
        self.out
            .values()
            .flat_map(FxHashMap::values)
            .map(|&w| u64::from(w))
            .sum()
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        self.out.get(from)?.get(to).copied()
    }

    /// Out-degree of `node` (0 if absent).
    pub fn out_degree(&self, node: &str) -> usize {
        self.out.get(node).map_or(0, FxHashMap::len)
    }

    /// In-degree of `node` (0 if absent).
    pub fn in_degree(&self, node: &str) -> usize {
        self.preds.get(node).map_or(0, FxHashSet::len)
    }

    /// Successors of `node`, lexicographically sorted.
    pub fn successors(&self, node: &str) -> Vec<&str> {
        let mut successors: Vec<&str> = self
            .out
            .get(node)
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        successors.sort_unstable();
        successors
    }

    /// Predecessors of `node`, lexicographically sorted.
    pub fn predecessors(&self, node: &str) -> Vec<&str> {
        let mut predecessors: Vec<&str> = self
            .preds
            .get(node)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default();
        predecessors.sort_unstable();
        predecessors
    }

    /// All nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.out.keys().map(String::as_str)
    }

    /// All nodes, lexicographically sorted into an owned list.
    ///
    /// The owned list lets callers mutate the graph while walking it.
    pub fn nodes_sorted(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.out.keys().cloned().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Nodes with in-degree 0, lexicographically sorted.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = self
            .nodes()
            .filter(|node| self.in_degree(node) == 0)
            .collect();
        sources.sort_unstable();
        sources
    }

    /// Nodes with out-degree 0, lexicographically sorted.
    pub fn sinks(&self) -> Vec<&str> {
        let mut sinks: Vec<&str> = self
            .nodes()
            .filter(|node| self.out_degree(node) == 0)
            .collect();
        sinks.sort_unstable();
        sinks
    }

    /// Removes the edge `from -> to`. Returns `true` if it existed.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> bool {
        let removed = self
            .out
            .get_mut(from)
            .is_some_and(|successors| successors.remove(to).is_some());
        if removed {
            if let Some(predecessors) = self.preds.get_mut(to) {
                predecessors.remove(from);
            }
        }
        removed
    }

    /// Removes a node and all its incident edges. Returns `true` if it existed.
    pub fn remove_node(&mut self, node: &str) -> bool {
        let Some(successors) = self.out.remove(node) else {
            return false;
        };
        for successor in successors.keys() {
            if let Some(predecessors) = self.preds.get_mut(successor) {
                predecessors.remove(node);
            }
        }
        if let Some(predecessors) = self.preds.remove(node) {
            for predecessor in predecessors {
                if let Some(siblings) = self.out.get_mut(&predecessor) {
                    siblings.remove(node);
                }
            }
        }
        true
    }

    /// Removes a path from the graph: interior nodes always, the entry and
    /// sink endpoints per flag, and any surviving edges between consecutive
    /// path nodes. Missing nodes and edges are ignored.
    pub fn remove_path(&mut self, path: &[String], delete_entry: bool, delete_sink: bool) {
        if path.is_empty() {
            return;
        }
        if path.len() > 2 {
            for node in &path[1..path.len() - 1] {
                self.remove_node(node);
            }
        }
        if delete_entry {
            self.remove_node(&path[0]);
        }
        if delete_sink {
            if let Some(last) = path.last() {
                self.remove_node(last);
            }
        }
        for pair in path.windows(2) {
            self.remove_edge(&pair[0], &pair[1]);
        }
    }
}
