//! A generic best-first pathfinding engine. The search is defined over an
//! abstract node type plus two capabilities supplied by the caller's graph
//! adapter (neighbor enumeration and a cost heuristic), so the engine has
//! zero knowledge of hex geometry. [Navigator] is the one component that
//! couples it to a grid.

mod navigate;

pub use self::navigate::*;

use crate::util;
use fnv::FnvBuildHasher;
use indexmap::{map::Entry, IndexMap};
use log::debug;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    fmt::Debug,
    hash::Hash,
};

/// The capabilities a graph must supply to be searchable. Node identity is
/// plain value equality; the engine imposes nothing else on the node type.
pub trait PathGraph {
    type Node: Copy + Eq + Hash + Debug;

    /// Enumerate the nodes reachable from the given node in one step. Every
    /// step costs 1; a graph models terrain cost by withholding neighbors,
    /// not by weighting them.
    fn neighbors(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Estimate the remaining cost from `from` to `to`. Must be non-negative
    /// and finite, and must never overstate the true remaining step count if
    /// shortest paths are to be guaranteed. The default estimates nothing,
    /// which degrades the search to uniform-cost (Dijkstra) behavior: a
    /// valid configuration, just a slower one.
    fn heuristic(&self, _from: Self::Node, _to: Self::Node) -> f64 {
        0.0
    }
}

/// Per-node bookkeeping for one search invocation
#[derive(Copy, Clone, Debug)]
struct Record<N> {
    /// Cost of the best known path from the start, in steps
    g: u32,
    /// The node we reached this one from, on that best known path
    parent: Option<N>,
    /// Once closed, a node's g is final and it is never expanded again
    closed: bool,
}

/// One entry in the open set. Entries are ordered by `f = g + h`, with the
/// discovery sequence number as the tie-breaker so that equal-cost searches
/// are fully deterministic. Improved paths push a fresh entry rather than
/// mutating the heap; superseded entries are recognized and skipped when
/// popped.
#[derive(Copy, Clone, Debug)]
struct Candidate<N> {
    f: f64,
    seq: u64,
    g: u32,
    node: N,
}

// Heuristics are required to be finite, so ordering on f is total in
// practice; cmp_unwrap turns a NaN straight into a panic rather than a
// silently wrong search order
impl<N> Ord for Candidate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        util::cmp_unwrap(&self.f, &other.f)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<N> PartialOrd for Candidate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> PartialEq for Candidate<N> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl<N> Eq for Candidate<N> {}

/// Compute a shortest path from `start` to `goal` over the given graph.
///
/// Returns the full node sequence including both endpoints, or an empty vec
/// if the goal is unreachable. **An empty result is a valid terminal state,
/// not an error**; callers distinguish "no path" by checking emptiness.
///
/// Each invocation allocates fresh open/closed state, so the function is
/// re-entrant and holds nothing across calls. The search runs to completion
/// on the calling thread; there is no step limit or cancellation.
pub fn find_path<G: PathGraph>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
) -> Vec<G::Node> {
    if start == goal {
        return vec![start];
    }

    // Node records keyed by node; IndexMap so that iteration (and therefore
    // any debugging output) follows discovery order
    let mut records: IndexMap<G::Node, Record<G::Node>, FnvBuildHasher> =
        IndexMap::default();
    let mut open: BinaryHeap<Reverse<Candidate<G::Node>>> = BinaryHeap::new();
    let mut seq = 0u64;

    records.insert(
        start,
        Record {
            g: 0,
            parent: None,
            closed: false,
        },
    );
    open.push(Reverse(Candidate {
        f: graph.heuristic(start, goal),
        seq,
        g: 0,
        node: start,
    }));

    let mut expansions = 0u64;
    while let Some(Reverse(candidate)) = open.pop() {
        let record = records[&candidate.node];
        if record.closed || candidate.g > record.g {
            // A better path to this node was found after this entry was
            // pushed
            continue;
        }

        if candidate.node == goal {
            debug!(
                "Found path to {:?} after {} expansions",
                goal, expansions
            );
            return reconstruct(&records, goal);
        }

        if let Some(record) = records.get_mut(&candidate.node) {
            record.closed = true;
        }
        expansions += 1;

        for neighbor in graph.neighbors(candidate.node) {
            let tentative_g = candidate.g + 1;
            let improved = match records.entry(neighbor) {
                Entry::Occupied(mut entry) => {
                    let record = entry.get_mut();
                    if !record.closed && tentative_g < record.g {
                        record.g = tentative_g;
                        record.parent = Some(candidate.node);
                        true
                    } else {
                        false
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(Record {
                        g: tentative_g,
                        parent: Some(candidate.node),
                        closed: false,
                    });
                    true
                }
            };
            if improved {
                seq += 1;
                open.push(Reverse(Candidate {
                    f: f64::from(tentative_g)
                        + graph.heuristic(neighbor, goal),
                    seq,
                    g: tentative_g,
                    node: neighbor,
                }));
            }
        }
    }

    debug!(
        "Search exhausted after {} expansions; no path from {:?} to {:?}",
        expansions, start, goal
    );
    Vec::new()
}

/// Walk parent links back from the goal, then flip the result around so it
/// reads start-to-goal
fn reconstruct<N: Copy + Eq + Hash>(
    records: &IndexMap<N, Record<N>, FnvBuildHasher>,
    goal: N,
) -> Vec<N> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = records[&current].parent {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A graph that has nothing to do with hexes: integers 0..len laid out
    /// in a line, with an optional impassable value
    struct LineGraph {
        len: i32,
        gap: Option<i32>,
    }

    impl PathGraph for LineGraph {
        type Node = i32;

        fn neighbors(&self, node: i32) -> Vec<i32> {
            [node - 1, node + 1]
                .into_iter()
                .filter(|n| {
                    (0..self.len).contains(n) && Some(*n) != self.gap
                })
                .collect()
        }
    }

    /// A bounded 2D lattice with only right/up steps exposed, used to pin
    /// down deterministic tie-breaking between equal-cost paths
    struct LatticeGraph;

    impl PathGraph for LatticeGraph {
        type Node = (i32, i32);

        fn neighbors(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
            [(x + 1, y), (x, y + 1)]
                .into_iter()
                .filter(|(x, y)| (0..=2).contains(x) && (0..=2).contains(y))
                .collect()
        }
    }

    #[test]
    fn test_finds_shortest_path() {
        let graph = LineGraph { len: 5, gap: None };
        assert_eq!(find_path(&graph, 0, 4), vec![0, 1, 2, 3, 4]);
        assert_eq!(find_path(&graph, 3, 1), vec![3, 2, 1]);
    }

    #[test]
    fn test_start_equals_goal() {
        let graph = LineGraph { len: 5, gap: None };
        assert_eq!(find_path(&graph, 2, 2), vec![2]);
    }

    #[test]
    fn test_exhausted_is_empty_not_error() {
        let graph = LineGraph { len: 5, gap: Some(2) };
        assert_eq!(find_path(&graph, 0, 4), Vec::<i32>::new());
        // Goal outside the graph entirely
        assert_eq!(find_path(&graph, 0, 17), Vec::<i32>::new());
    }

    #[test]
    fn test_deterministic_tie_break() {
        // Every monotone staircase from (0,0) to (2,2) costs 4 steps; the
        // discovery-order tie-break means the same one wins every time:
        // right edges are discovered before up edges
        let path = find_path(&LatticeGraph, (0, 0), (2, 2));
        assert_eq!(path, vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_engine_is_stateless() {
        // Back-to-back queries on the same graph don't interfere
        let graph = LineGraph { len: 10, gap: None };
        let first = find_path(&graph, 0, 9);
        let second = find_path(&graph, 0, 9);
        assert_eq!(first, second);
        assert_eq!(find_path(&graph, 9, 0).len(), 10);
    }
}
