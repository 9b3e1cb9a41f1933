//! Integration tests for Dijkstra and A* search
//!
//! The open set re-prioritises entries through `PriorityQueue::update_first`,
//! so these graphs include cases where the first route found to a node is
//! not the cheapest one.

use rust_comparator_heaps::pathfinding::{
    astar, dijkstra, reachable_within, AStarNode, SearchBuilder, SearchNode,
};

// 6x6 grid with a wall - carries goal coordinates
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct GridPos {
    x: i32,
    y: i32,
    goal_x: i32,
    goal_y: i32,
}

impl GridPos {
    fn new(x: i32, y: i32, goal_x: i32, goal_y: i32) -> Self {
        GridPos { x, y, goal_x, goal_y }
    }

    fn step(&self, dx: i32, dy: i32) -> Self {
        GridPos::new(self.x + dx, self.y + dy, self.goal_x, self.goal_y)
    }

    fn blocked(x: i32, y: i32) -> bool {
        // Vertical wall at x == 2 with a gap at y == 4
        x == 2 && (0..4).contains(&y)
    }
}

impl SearchNode for GridPos {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .map(|(dx, dy)| self.step(dx, dy))
            .filter(|p| (0..6).contains(&p.x) && (0..6).contains(&p.y))
            .filter(|p| !GridPos::blocked(p.x, p.y))
            .map(|p| (p, 1))
            .collect()
    }

    fn is_goal(&self) -> bool {
        self.x == self.goal_x && self.y == self.goal_y
    }
}

impl AStarNode for GridPos {
    fn heuristic(&self) -> u32 {
        ((self.x - self.goal_x).abs() + (self.y - self.goal_y).abs()) as u32
    }
}

// Weighted graph node that carries its goal
//
//     A --1-- B --1-- D
//     |       |
//     5       1
//     |       |
//     C --1-- E
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct WeightedNode {
    id: char,
    goal: char,
}

impl SearchNode for WeightedNode {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        let to = |id| WeightedNode { id, goal: self.goal };
        match self.id {
            'A' => vec![(to('B'), 1), (to('C'), 5)],
            'B' => vec![(to('D'), 1), (to('E'), 1)],
            'C' => vec![(to('E'), 1)],
            _ => vec![],
        }
    }

    fn is_goal(&self) -> bool {
        self.id == self.goal
    }
}

// Chain where every node is first reached by an expensive edge:
// i --100--> i+2 is discovered before i --1--> i+1 --1--> i+2
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct ShortcutNode {
    id: u32,
    goal: u32,
}

impl SearchNode for ShortcutNode {
    type Cost = u64;

    fn successors(&self) -> Vec<(Self, u64)> {
        if self.id >= self.goal {
            return vec![];
        }
        let to = |id| ShortcutNode { id, goal: self.goal };
        vec![(to(self.id + 2), 100), (to(self.id + 1), 1)]
    }

    fn is_goal(&self) -> bool {
        self.id == self.goal
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct ReachableNode(i32);

impl SearchNode for ReachableNode {
    type Cost = u32;

    fn successors(&self) -> Vec<(Self, u32)> {
        if self.0 < 100 {
            vec![(ReachableNode(self.0 + 1), 1)]
        } else {
            vec![]
        }
    }

    fn is_goal(&self) -> bool {
        false
    }
}

// Signed costs, so a limit below the start cost is expressible
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct SignedNode {
    id: i32,
    goal: i32,
}

impl SearchNode for SignedNode {
    type Cost = i64;

    fn successors(&self) -> Vec<(Self, i64)> {
        if self.id < 10 {
            vec![(SignedNode { id: self.id + 1, goal: self.goal }, 2)]
        } else {
            vec![]
        }
    }

    fn is_goal(&self) -> bool {
        self.id == self.goal
    }
}

impl AStarNode for SignedNode {
    fn heuristic(&self) -> i64 {
        0
    }
}

// ==================== Dijkstra Tests ====================

#[test]
fn test_dijkstra_weighted_graph() {
    let (path, cost) = dijkstra(&WeightedNode { id: 'A', goal: 'E' }).unwrap();
    // A -> B -> E (cost 2), not A -> C -> E (cost 6)
    assert_eq!(cost, 2);
    let ids: Vec<_> = path.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec!['A', 'B', 'E']);
}

#[test]
fn test_dijkstra_unreachable_goal() {
    assert!(dijkstra(&WeightedNode { id: 'C', goal: 'A' }).is_none());
}

#[test]
fn test_dijkstra_grid_around_wall() {
    let (path, cost) = dijkstra(&GridPos::new(0, 0, 4, 0)).unwrap();
    // Up to y = 4, across the gap, back down
    assert_eq!(cost, 12);
    assert_eq!(path.len(), 13);
    assert_eq!((path[0].x, path[0].y), (0, 0));
    assert!(path.iter().all(|p| !GridPos::blocked(p.x, p.y)));
}

#[test]
fn test_dijkstra_shortcuts_are_replaced() {
    let (path, cost) = dijkstra(&ShortcutNode { id: 0, goal: 50 }).unwrap();
    assert_eq!(cost, 50);
    assert_eq!(path.len(), 51);
    assert!(path.windows(2).all(|w| w[1].id == w[0].id + 1));
}

// ==================== A* Tests ====================

#[test]
fn test_astar_grid() {
    let (path, cost) = astar(&GridPos::new(0, 0, 5, 5)).unwrap();
    assert_eq!(cost, 10);
    let last = path.last().unwrap();
    assert_eq!((last.x, last.y), (5, 5));
}

#[test]
fn test_astar_matches_dijkstra() {
    for (gx, gy) in [(4, 0), (5, 1), (3, 3), (0, 5)] {
        let start = GridPos::new(0, 0, gx, gy);
        let a = astar(&start).map(|(_, c)| c);
        let d = dijkstra(&start).map(|(_, c)| c);
        assert_eq!(a, d, "goal ({}, {})", gx, gy);
    }
}

#[test]
fn test_astar_same_start_goal() {
    let (path, cost) = astar(&GridPos::new(3, 3, 3, 3)).unwrap();
    assert_eq!(cost, 0);
    assert_eq!(path.len(), 1);
}

// ==================== Builder Tests ====================

#[test]
fn test_builder_max_cost() {
    let result = SearchBuilder::new(ReachableNode(0)).max_cost(3).dijkstra();
    assert!(result.is_none());
}

#[test]
fn test_builder_max_nodes() {
    let start = ShortcutNode { id: 0, goal: 10 };
    assert!(SearchBuilder::new(start.clone()).max_nodes(5).dijkstra().is_none());

    let (_, cost) = SearchBuilder::new(start).max_nodes(20).max_cost(10).dijkstra().unwrap();
    assert_eq!(cost, 10);
}

// ==================== Reachable Within Tests ====================

#[test]
fn test_reachable_within() {
    let reachable = reachable_within(&ReachableNode(0), 5);
    assert_eq!(reachable.len(), 6);
    for (node, cost) in &reachable {
        assert!((0..=5).contains(&node.0));
        assert_eq!(*cost, node.0 as u32);
    }
}

#[test]
fn test_reachable_within_zero() {
    let reachable = reachable_within(&ReachableNode(0), 0);
    assert_eq!(reachable, vec![(ReachableNode(0), 0)]);
}

#[test]
fn test_cost_limit_applies_to_start() {
    let start = SignedNode { id: 0, goal: 0 };

    assert!(reachable_within(&start, -1).is_empty());
    assert!(SearchBuilder::new(start.clone()).max_cost(-1).dijkstra().is_none());
    assert!(SearchBuilder::new(start.clone()).max_cost(-1).astar().is_none());

    let (path, cost) = SearchBuilder::new(start).max_cost(0).dijkstra().unwrap();
    assert_eq!(cost, 0);
    assert_eq!(path.len(), 1);
}

#[test]
fn test_reachable_within_signed_costs() {
    let reachable = reachable_within(&SignedNode { id: 0, goal: -1 }, 5);
    let ids: Vec<_> = reachable.iter().map(|(n, c)| (n.id, *c)).collect();
    assert_eq!(ids, vec![(0, 0), (1, 2), (2, 4)]);
}
