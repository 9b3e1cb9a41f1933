//! Dijkstra's and A* search on top of [`PriorityQueue`]
//!
//! The open set is a single [`PriorityQueue`] holding one entry per
//! discovered node. When a cheaper route to an open node is found its entry
//! is re-prioritised in place with [`PriorityQueue::update_first`], which is
//! the binary-heap counterpart of `decrease_key`: a linear search for the
//! entry followed by a logarithmic replace.
//!
//! Node states are interned into dense indices through an `FxHashMap`, so the
//! queue only ever stores small `Copy` entries.
//!
//! Dijkstra is A* with a heuristic of zero.
//!
//! # Example
//!
//! ```rust
//! use rust_comparator_heaps::pathfinding::{dijkstra, SearchNode};
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//! let (path, cost) = dijkstra(&start).unwrap();
//! assert_eq!(cost, 4);
//! assert_eq!(path.len(), 5);
//! ```

use crate::priority_queue::PriorityQueue;
use crate::traits::Comparator;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries whatever context it needs to enumerate its neighbours
/// and to recognise a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// Edge weight type
    type Cost: Cost;

    /// All neighbours with the cost of the edge leading to them
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node ends the search
    fn is_goal(&self) -> bool;
}

/// Nodes that can estimate their remaining distance for A* search.
///
/// The heuristic must never overestimate for A* to return optimal paths.
pub trait AStarNode: SearchNode {
    /// Estimated cost from this node to the nearest goal
    fn heuristic(&self) -> Self::Cost;
}

type NodeIndex = usize;

/// Open-set entry: scores plus the interned node index
#[derive(Debug, Clone, Copy)]
struct OpenEntry<C> {
    f_score: C,
    g_score: C,
    index: NodeIndex,
}

/// Lowest f-score at the root
#[derive(Debug, Clone, Copy, Default)]
struct LowestScore;

impl<C: Ord> Comparator<OpenEntry<C>> for LowestScore {
    fn before(&self, a: &OpenEntry<C>, b: &OpenEntry<C>) -> bool {
        a.f_score < b.f_score
    }
}

struct NodeEntry<N: SearchNode> {
    node: N,
    g_score: N::Cost,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Bookkeeping for one search run
struct Search<N: SearchNode> {
    entries: Vec<NodeEntry<N>>,
    indices: FxHashMap<N, NodeIndex>,
    open: PriorityQueue<OpenEntry<N::Cost>, LowestScore>,
}

impl<N: SearchNode> Search<N> {
    fn new(start: &N, start_h: N::Cost) -> Self {
        let mut search = Search {
            entries: Vec::new(),
            indices: FxHashMap::default(),
            open: PriorityQueue::new(LowestScore),
        };
        search.indices.insert(start.clone(), 0);
        search.entries.push(NodeEntry {
            node: start.clone(),
            g_score: N::Cost::default(),
            came_from: None,
            closed: false,
        });
        search.open.enqueue(OpenEntry {
            f_score: start_h,
            g_score: N::Cost::default(),
            index: 0,
        });
        search
    }

    /// Pops the cheapest open node and closes it
    fn settle_next(&mut self) -> Option<OpenEntry<N::Cost>> {
        let next = self.open.dequeue()?;
        self.entries[next.index].closed = true;
        Some(next)
    }

    /// Records a route to `neighbor` through `from` costing `g_score`
    fn relax(&mut self, from: NodeIndex, neighbor: N, g_score: N::Cost, h_score: N::Cost) {
        let candidate = |index| OpenEntry {
            f_score: g_score + h_score,
            g_score,
            index,
        };

        let existing = self.indices.get(&neighbor).copied();
        match existing {
            None => {
                let index = self.entries.len();
                self.indices.insert(neighbor.clone(), index);
                self.entries.push(NodeEntry {
                    node: neighbor,
                    g_score,
                    came_from: Some(from),
                    closed: false,
                });
                self.open.enqueue(candidate(index));
            }
            Some(index) => {
                let entry = &mut self.entries[index];
                if entry.closed || g_score >= entry.g_score {
                    return;
                }
                entry.g_score = g_score;
                entry.came_from = Some(from);
                self.open
                    .update_first(|open| open.index == index, candidate(index));
            }
        }
    }

    fn node(&self, index: NodeIndex) -> &N {
        &self.entries[index].node
    }

    fn path_to(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(previous) = self.entries[current].came_from {
            path.push(self.entries[previous].node.clone());
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` holds.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
pub fn dijkstra<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    SearchBuilder::new(start.clone()).dijkstra()
}

/// Runs A* search from `start`, guided by the node's `heuristic()`.
pub fn astar<N: AStarNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    SearchBuilder::new(start.clone()).astar()
}

/// Builder for searches with cost or exploration limits.
///
/// ```rust
/// use rust_comparator_heaps::pathfinding::{SearchBuilder, SearchNode};
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Step(u32);
///
/// impl SearchNode for Step {
///     type Cost = u32;
///     fn successors(&self) -> Vec<(Self, u32)> {
///         vec![(Step(self.0 + 1), 1)]
///     }
///     fn is_goal(&self) -> bool {
///         self.0 == 10
///     }
/// }
///
/// assert!(SearchBuilder::new(Step(0)).max_cost(5).dijkstra().is_none());
/// assert_eq!(SearchBuilder::new(Step(0)).max_cost(10).dijkstra().map(|r| r.1), Some(10));
/// ```
pub struct SearchBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> SearchBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        SearchBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Ignores routes costing more than `cost`.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Gives up after settling `count` nodes.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra(self) -> Option<(Vec<N>, N::Cost)> {
        self.run(|_| N::Cost::default())
    }

    /// Runs A* search with the configured limits.
    pub fn astar(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
    {
        self.run(|n| n.heuristic())
    }

    fn run(self, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)> {
        let mut search = Search::new(&self.start, heuristic(&self.start));
        let mut settled = 0usize;

        while let Some(current) = search.settle_next() {
            if let Some(max) = self.max_nodes {
                if settled >= max {
                    return None;
                }
            }
            settled += 1;

            if self.max_cost.is_some_and(|max| current.g_score > max) {
                continue;
            }

            let node = search.node(current.index).clone();
            if node.is_goal() {
                return Some((search.path_to(current.index), current.g_score));
            }

            for (neighbor, edge_cost) in node.successors() {
                let g_score = current.g_score + edge_cost;
                if self.max_cost.is_some_and(|max| g_score > max) {
                    continue;
                }
                let h_score = heuristic(&neighbor);
                search.relax(current.index, neighbor, g_score, h_score);
            }
        }

        None
    }
}

/// Returns every node reachable from `start` within `max_cost`, with its
/// cheapest cost, in the order the nodes were settled.
pub fn reachable_within<N: SearchNode>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)> {
    let mut search = Search::new(start, N::Cost::default());
    let mut result = Vec::new();

    while let Some(current) = search.settle_next() {
        if current.g_score > max_cost {
            continue;
        }

        let node = search.node(current.index).clone();

        for (neighbor, edge_cost) in node.successors() {
            let g_score = current.g_score + edge_cost;
            if g_score <= max_cost {
                search.relax(current.index, neighbor, g_score, N::Cost::default());
            }
        }

        result.push((node, current.g_score));
    }

    result
}
