//! Dijkstra's shortest paths and Prim's minimum spanning tree on a d-way heap
//!
//! Both algorithms keep their frontier in a [`DWayHeap`] and lower a node's
//! tentative cost in place with [`DWayHeap::update_priority`].
//!
//! # Design
//!
//! The heap identifies elements by priority, so the frontier key is the pair
//! `(cost, node)` rather than the cost alone. Folding the node id into the key
//! makes every key unique, which turns each position group into a handle for
//! exactly one node. The comparator ranks smaller pairs higher, giving the
//! min-first order both algorithms need.
//!
//! Bookkeeping maps use FxHash, as node ids are small integers.
//!
//! # Example
//!
//! ```rust
//! use dway_heap::graph::{dijkstra, Graph};
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 4);
//! graph.add_edge(0, 2, 1);
//! graph.add_edge(2, 1, 2);
//! graph.add_edge(1, 3, 5);
//!
//! let paths = dijkstra(&graph, 0, 4).unwrap();
//! assert_eq!(paths.distance(3), Some(8));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use crate::dway::DWayHeap;
use crate::element::Element;
use crate::error::HeapError;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use tracing::debug;

/// Node identifier: an index into the graph's adjacency lists
pub type NodeId = usize;

/// Edge weight
pub type Weight = u64;

/// Frontier key: tentative cost first, node id as tie-breaker
type FrontierKey = (Weight, NodeId);

fn nearest_first(a: &FrontierKey, b: &FrontierKey) -> Ordering {
    b.cmp(a)
}

fn frontier_heap(
    branch_factor: usize,
    start: NodeId,
) -> Result<DWayHeap<NodeId, FrontierKey, fn(&FrontierKey, &FrontierKey) -> Ordering>, HeapError> {
    DWayHeap::with_comparator(
        branch_factor,
        [Element::new(start, (0, start))],
        nearest_first as fn(&FrontierKey, &FrontierKey) -> Ordering,
    )
}

/// A weighted graph stored as adjacency lists
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<(NodeId, Weight)>>,
}

impl Graph {
    /// Creates a graph with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Adds a directed edge, growing the node set if needed.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: Weight) {
        let needed = from.max(to) + 1;
        if self.adjacency.len() < needed {
            self.adjacency.resize(needed, Vec::new());
        }
        self.adjacency[from].push((to, weight));
    }

    /// Adds an edge in both directions.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) {
        self.add_edge(a, b, weight);
        self.add_edge(b, a, weight);
    }

    /// Outgoing edges of `node`; empty for nodes outside the graph.
    pub fn neighbors(&self, node: NodeId) -> &[(NodeId, Weight)] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Result of a single-source shortest path search.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeId,
    distances: FxHashMap<NodeId, Weight>,
    came_from: FxHashMap<NodeId, NodeId>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Cost of the cheapest path from the source, if `node` is reachable
    pub fn distance(&self, node: NodeId) -> Option<Weight> {
        self.distances.get(&node).copied()
    }

    /// Number of nodes reachable from the source, the source included
    pub fn reachable(&self) -> usize {
        self.distances.len()
    }

    /// Nodes along the cheapest path from the source to `node`, inclusive.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        if !self.distances.contains_key(&node) {
            return None;
        }

        let mut path = vec![node];
        let mut current = node;
        while let Some(&prev) = self.came_from.get(&current) {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra's algorithm from `source` over the whole reachable graph.
///
/// # Errors
/// [`HeapError::InvalidBranchFactor`] if `branch_factor < 2`.
pub fn dijkstra(graph: &Graph, source: NodeId, branch_factor: usize) -> Result<ShortestPaths, HeapError> {
    let mut heap = frontier_heap(branch_factor, source)?;
    let mut distances: FxHashMap<NodeId, Weight> = FxHashMap::default();
    let mut came_from: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut settled: FxHashSet<NodeId> = FxHashSet::default();
    let mut updates = 0usize;

    distances.insert(source, 0);

    while let Some(Element { task: node, priority: (dist, _) }) = heap.pop() {
        settled.insert(node);

        for &(next, weight) in graph.neighbors(node) {
            if settled.contains(&next) {
                continue;
            }
            let tentative = dist.saturating_add(weight);

            match distances.get(&next).copied() {
                None => {
                    distances.insert(next, tentative);
                    came_from.insert(next, node);
                    heap.push(Element::new(next, (tentative, next)))?;
                }
                Some(current) if tentative < current => {
                    distances.insert(next, tentative);
                    came_from.insert(next, node);
                    heap.update_priority(
                        &Element::new(next, (current, next)),
                        Element::new(next, (tentative, next)),
                    )?;
                    updates += 1;
                }
                Some(_) => {}
            }
        }
    }

    debug!(source, reachable = distances.len(), updates, "dijkstra finished");
    Ok(ShortestPaths {
        source,
        distances,
        came_from,
    })
}

/// A minimum spanning tree of the component containing the root.
#[derive(Debug, Clone, Default)]
pub struct SpanningTree {
    edges: Vec<(NodeId, NodeId, Weight)>,
}

impl SpanningTree {
    /// Tree edges as `(parent, child, weight)`, in the order they were added
    pub fn edges(&self) -> &[(NodeId, NodeId, Weight)] {
        &self.edges
    }

    pub fn total_weight(&self) -> Weight {
        self.edges.iter().map(|&(_, _, weight)| weight).sum()
    }
}

/// Runs Prim's algorithm from `root`.
///
/// The graph is expected to be undirected (see [`Graph::add_undirected_edge`]).
///
/// # Errors
/// [`HeapError::InvalidBranchFactor`] if `branch_factor < 2`.
pub fn prim(graph: &Graph, root: NodeId, branch_factor: usize) -> Result<SpanningTree, HeapError> {
    let mut heap = frontier_heap(branch_factor, root)?;
    // Cheapest known edge into each frontier node, and where it comes from.
    let mut best: FxHashMap<NodeId, (Weight, NodeId)> = FxHashMap::default();
    let mut in_tree: FxHashSet<NodeId> = FxHashSet::default();
    let mut tree = SpanningTree::default();

    while let Some(Element { task: node, priority: (weight, _) }) = heap.pop() {
        in_tree.insert(node);
        if let Some(&(_, parent)) = best.get(&node) {
            tree.edges.push((parent, node, weight));
        }

        for &(next, edge) in graph.neighbors(node) {
            if in_tree.contains(&next) {
                continue;
            }

            match best.get(&next).copied() {
                None => {
                    best.insert(next, (edge, node));
                    heap.push(Element::new(next, (edge, next)))?;
                }
                Some((current, _)) if edge < current => {
                    best.insert(next, (edge, node));
                    heap.update_priority(
                        &Element::new(next, (current, next)),
                        Element::new(next, (edge, next)),
                    )?;
                }
                Some(_) => {}
            }
        }
    }

    debug!(root, edges = tree.edges.len(), total = tree.total_weight(), "prim finished");
    Ok(tree)
}
