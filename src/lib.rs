//! Comparator-driven binary heaps for Rust
//!
//! This crate provides a binary heap whose ordering is a value chosen at
//! construction, and a priority queue built on it that supports updating
//! queued elements. They are meant as building blocks for scheduling, graph
//! search and event simulation.
//!
//! # Features
//!
//! - **[`Heap`](heap::Heap)**: O(log n) push/pop, O(n) bulk build, removal and
//!   replacement at any storage index, predicate search
//! - **[`PriorityQueue`](priority_queue::PriorityQueue)**: `enqueue`/`dequeue`
//!   plus `update` and `update_first` for priority changes
//! - **[`Comparator`]**: any `Fn(&T, &T) -> bool`, or the ready-made
//!   [`MinOrder`] / [`MaxOrder`]
//! - **[`pathfinding`]**: Dijkstra and A* using the priority queue's updates
//! - **`serde`** (cargo feature): serialize containers as their storage
//!   sequence
//!
//! Iteration is destructive: [`Heap::drain_sorted`](heap::Heap::drain_sorted)
//! and [`Heap::into_sorted_iter`](heap::Heap::into_sorted_iter) yield elements
//! in removal order, emptying the heap. Use
//! [`Heap::sorted_snapshot`](heap::Heap::sorted_snapshot) to keep the original.
//!
//! The containers are single-owner structures with no internal locking.
//!
//! # Example
//!
//! ```rust
//! use rust_comparator_heaps::heap::Heap;
//! use rust_comparator_heaps::priority_queue::PriorityQueue;
//! use rust_comparator_heaps::{MaxOrder, MinOrder};
//!
//! let heap = Heap::from_vec(vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7], MaxOrder);
//! assert_eq!(heap.peek(), Some(&16));
//!
//! let mut queue = PriorityQueue::new(MinOrder);
//! queue.enqueue(3);
//! queue.enqueue(1);
//! queue.update_first_equal(&3, 0);
//! assert_eq!(queue.dequeue(), Some(0));
//! assert_eq!(queue.dequeue(), Some(1));
//! ```

pub mod heap;
pub mod pathfinding;
pub mod priority_queue;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{Comparator, HeapError, MaxOrder, MinOrder, PriorityContainer, Slot};
