//! Graph simplification: tip and bubble removal.
//!
//! Two cleanup passes run in a fixed order. Tips go first so that a
//! low-support dead end is never mistaken for one arm of a bubble. Both
//! passes are best-effort heuristics: they never fail on a well-formed
//! graph, and an empty or fully linear graph passes through untouched.
//!
//! A *tip* is a short dead-end arm hanging off a junction, typically left
//! by a sequencing error near the end of a read. An arm is only removed
//! when its total weight is strictly below the best-supported sibling arm
//! at the same junction, so the sole path between a true source and sink
//! is never deleted.
//!
//! A *bubble* is a pair of paths that diverge from a shared ancestor and
//! reconverge at a shared descendant, typically a mid-read sequencing error
//! or a minor variant. The higher-weight path wins; ties fall to the
//! shorter path, then to the lexicographically smaller node sequence, so
//! resolution is fully deterministic. Passes repeat until a fixpoint so
//! nested and chained bubbles resolve, with a round cap to guarantee
//! termination on pathological inputs.
//!
//! Hop bounds and the round cap are heuristic policy, not architecture,
//! and are exposed through [`SimplifyOptions`].

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::graph::DeBruijnGraph;

/// Default bound on tip arm length, in edges.
pub const DEFAULT_MAX_TIP_HOPS: usize = 8;
/// Default bound on bubble path length, in edges.
pub const DEFAULT_MAX_BUBBLE_HOPS: usize = 16;
/// Default cap on simplification rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Tuning for the simplification heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// An arm longer than this many edges is never treated as a tip.
    pub max_tip_hops: usize,
    /// Bubble arms are searched within this many edges of the junction.
    pub max_bubble_hops: usize,
    /// Upper bound on passes for each stage.
    pub max_rounds: usize,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            max_tip_hops: DEFAULT_MAX_TIP_HOPS,
            max_bubble_hops: DEFAULT_MAX_BUBBLE_HOPS,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

/// Counts of artifacts removed by [`simplify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    /// Tip arms removed.
    pub tips_removed: usize,
    /// Bubbles popped.
    pub bubbles_removed: usize,
}

/// Runs both cleanup passes in order: tips, then bubbles.
pub fn simplify(graph: &mut DeBruijnGraph, options: &SimplifyOptions) -> SimplifyStats {
    let tips_removed = remove_tips(graph, options);
    let bubbles_removed = remove_bubbles(graph, options);
    debug!(tips_removed, bubbles_removed, "simplified graph");
    SimplifyStats {
        tips_removed,
        bubbles_removed,
    }
}

/// Which side of a junction an arm hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// Incoming arms at a merge point, traced back toward sources.
    Entry,
    /// Outgoing arms at a branch point, traced forward toward sinks.
    Exit,
}

/// An arm traced away from a junction.
struct Arm {
    /// Path in forward edge order; the junction is the last node for entry
    /// arms and the first node for exit arms.
    path: Vec<String>,
    /// Sum of edge weights along the traced path.
    weight: u64,
    /// Whether the arm terminates in an exclusive dead end within bounds.
    is_tip: bool,
}

/// Removes tip arms until a pass makes no change, or the round cap hits.
pub fn remove_tips(graph: &mut DeBruijnGraph, options: &SimplifyOptions) -> usize {
    let mut removed = 0;
    for _ in 0..options.max_rounds {
        let pruned = prune_tips_once(graph, options.max_tip_hops);
        if pruned == 0 {
            break;
        }
        removed += pruned;
    }
    removed
}

fn prune_tips_once(graph: &mut DeBruijnGraph, max_hops: usize) -> usize {
    let mut removed = 0;
    for node in graph.nodes_sorted() {
        if !graph.contains_node(&node) {
            continue;
        }
        if graph.in_degree(&node) >= 2 {
            removed += prune_arms(graph, &node, Side::Entry, max_hops);
        }
        if graph.contains_node(&node) && graph.out_degree(&node) >= 2 {
            removed += prune_arms(graph, &node, Side::Exit, max_hops);
        }
    }
    removed
}

fn prune_arms(graph: &mut DeBruijnGraph, junction: &str, side: Side, max_hops: usize) -> usize {
    let neighbors: Vec<String> = match side {
        Side::Entry => graph.predecessors(junction),
        Side::Exit => graph.successors(junction),
    }
    .into_iter()
    .map(ToString::to_string)
    .collect();
    if neighbors.len() < 2 {
        return 0;
    }

    let arms: Vec<Arm> = neighbors
        .iter()
        .map(|neighbor| trace_arm(graph, junction, neighbor, side, max_hops))
        .collect();
    let best = arms.iter().map(|arm| arm.weight).max().unwrap_or(0);

    let mut removed = 0;
    for arm in &arms {
        // Strictly dominated dead ends only: ties survive, and so does the
        // sole path between a true source and sink.
        if arm.is_tip && arm.weight < best {
            debug!(
                junction,
                len = arm.path.len() - 1,
                weight = arm.weight,
                "removing tip"
            );
            match side {
                Side::Entry => graph.remove_path(&arm.path, true, false),
                Side::Exit => graph.remove_path(&arm.path, false, true),
            }
            removed += 1;
        }
    }
    removed
}

/// Walks away from `junction` through `neighbor` while the arm stays
/// unbranched, up to `max_hops` edges.
fn trace_arm(
    graph: &DeBruijnGraph,
    junction: &str,
    neighbor: &str,
    side: Side,
    max_hops: usize,
) -> Arm {
    let mut path = vec![junction.to_string(), neighbor.to_string()];
    let mut weight = u64::from(
        match side {
            Side::Entry => graph.weight(neighbor, junction),
            Side::Exit => graph.weight(junction, neighbor),
        }
        .unwrap_or(0),
    );
    let mut cur = neighbor.to_string();
    let mut hops = 1;

    loop {
        let (in_deg, out_deg) = (graph.in_degree(&cur), graph.out_degree(&cur));
        let dead_end = match side {
            Side::Entry => in_deg == 0 && out_deg == 1,
            Side::Exit => out_deg == 0 && in_deg == 1,
        };
        if dead_end {
            if side == Side::Entry {
                path.reverse();
            }
            return Arm {
                path,
                weight,
                is_tip: true,
            };
        }
        if in_deg != 1 || out_deg != 1 || hops >= max_hops {
            if side == Side::Entry {
                path.reverse();
            }
            return Arm {
                path,
                weight,
                is_tip: false,
            };
        }

        let next = match side {
            Side::Entry => graph.predecessors(&cur).first().map(ToString::to_string),
            Side::Exit => graph.successors(&cur).first().map(ToString::to_string),
        };
        let Some(next) = next else {
            if side == Side::Entry {
                path.reverse();
            }
            return Arm {
                path,
                weight,
                is_tip: false,
            };
        };
        weight += u64::from(
            match side {
                Side::Entry => graph.weight(&next, &cur),
                Side::Exit => graph.weight(&cur, &next),
            }
            .unwrap_or(0),
        );
        path.push(next.clone());
        cur = next;
        hops += 1;
    }
}

/// Pops bubbles until a pass makes no change, or the round cap hits.
pub fn remove_bubbles(graph: &mut DeBruijnGraph, options: &SimplifyOptions) -> usize {
    let mut removed = 0;
    for _ in 0..options.max_rounds {
        let mut changed = false;
        for merge in graph.nodes_sorted() {
            if !graph.contains_node(&merge) || graph.in_degree(&merge) < 2 {
                continue;
            }
            // The graph strictly shrinks on every pop, so this terminates.
            while pop_bubble(graph, &merge, options.max_bubble_hops) {
                removed += 1;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    removed
}

/// Resolves one bubble reconverging at `merge`, if any. Returns `true` if
/// the graph changed.
fn pop_bubble(graph: &mut DeBruijnGraph, merge: &str, max_hops: usize) -> bool {
    let preds: Vec<String> = graph
        .predecessors(merge)
        .into_iter()
        .map(ToString::to_string)
        .collect();

    for (i, left) in preds.iter().enumerate() {
        for right in &preds[i + 1..] {
            let Some(ancestor) = common_ancestor(graph, left, right, merge, max_hops) else {
                continue;
            };
            let paths = simple_paths(graph, &ancestor, merge, max_hops);
            if paths.len() < 2 {
                continue;
            }

            let mut ranked: Vec<(u64, Vec<String>)> = paths
                .into_iter()
                .map(|path| (path_weight(graph, &path), path))
                .collect();
            // Highest total weight first; ties fall to the shorter path,
            // then the lexicographically smaller node sequence.
            ranked.sort_by(|(wa, pa), (wb, pb)| {
                wb.cmp(wa)
                    .then_with(|| pa.len().cmp(&pb.len()))
                    .then_with(|| pa.cmp(pb))
            });

            let Some(((_, winner), losers)) = ranked.split_first() else {
                continue;
            };
            debug!(ancestor = %ancestor, merge, arms = losers.len() + 1, "popping bubble");

            let winner_nodes: FxHashSet<&String> = winner.iter().collect();
            let winner_edges: FxHashSet<(&String, &String)> =
                winner.windows(2).map(|pair| (&pair[0], &pair[1])).collect();
            for (_, loser) in losers {
                if loser.len() > 2 {
                    for node in &loser[1..loser.len() - 1] {
                        if !winner_nodes.contains(node) {
                            graph.remove_node(node);
                        }
                    }
                }
                for pair in loser.windows(2) {
                    if !winner_edges.contains(&(&pair[0], &pair[1])) {
                        graph.remove_edge(&pair[0], &pair[1]);
                    }
                }
            }
            return true;
        }
    }
    false
}

/// Sum of edge weights along a path.
fn path_weight(graph: &DeBruijnGraph, path: &[String]) -> u64 {
    path.windows(2)
        .map(|pair| u64::from(graph.weight(&pair[0], &pair[1]).unwrap_or(0)))
        .sum()
}

/// The closest node reaching both `left` and `right` within `max_hops`
/// backward edges, excluding `merge` itself. Ties break to the
/// lexicographically smaller node.
fn common_ancestor(
    graph: &DeBruijnGraph,
    left: &str,
    right: &str,
    merge: &str,
    max_hops: usize,
) -> Option<String> {
    let from_left = bounded_ancestors(graph, left, max_hops);
    let from_right = bounded_ancestors(graph, right, max_hops);

    let mut best: Option<(usize, String)> = None;
    for (node, dist_left) in &from_left {
        if node == merge {
            continue;
        }
        let Some(dist_right) = from_right.get(node) else {
            continue;
        };
        let dist = dist_left + dist_right;
        let better = match &best {
            None => true,
            Some((best_dist, best_node)) => {
                dist < *best_dist || (dist == *best_dist && node < best_node)
            }
        };
        if better {
            best = Some((dist, node.clone()));
        }
    }
    best.map(|(_, node)| node)
}

/// Backward BFS: every node reaching `start` within `max_hops` edges,
/// mapped to its distance. Includes `start` at distance 0.
fn bounded_ancestors(
    graph: &DeBruijnGraph,
    start: &str,
    max_hops: usize,
) -> FxHashMap<String, usize> {
    let mut dist: FxHashMap<String, usize> = FxHashMap::default();
    dist.insert(start.to_string(), 0);
    let mut queue = VecDeque::from([start.to_string()]);

    while let Some(node) = queue.pop_front() {
        let d = dist.get(&node).copied().unwrap_or(0);
        if d >= max_hops {
            continue;
        }
        for pred in graph.predecessors(&node) {
            if !dist.contains_key(pred) {
                dist.insert(pred.to_string(), d + 1);
                queue.push_back(pred.to_string());
            }
        }
    }
    dist
}

/// All simple paths `from -> to` of at most `max_hops` edges, in the
/// deterministic order induced by sorted successor iteration.
fn simple_paths(
    graph: &DeBruijnGraph,
    from: &str,
    to: &str,
    max_hops: usize,
) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut path = vec![from.to_string()];
    collect_simple_paths(graph, from, to, max_hops, &mut path, &mut paths);
    paths
}

fn collect_simple_paths(
    graph: &DeBruijnGraph,
    cur: &str,
    target: &str,
    max_hops: usize,
    path: &mut Vec<String>,
    paths: &mut Vec<Vec<String>>,
) {
    if cur == target && path.len() > 1 {
        paths.push(path.clone());
        return;
    }
    if path.len() > max_hops {
        return;
    }
    for succ in graph.successors(cur) {
        if succ != target && path.iter().any(|node| node == succ) {
            continue;
        }
        path.push(succ.to_string());
        collect_simple_paths(graph, succ, target, max_hops, path, paths);
        path.pop();
    }
}
