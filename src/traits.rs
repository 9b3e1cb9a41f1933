//! Common traits for the heap containers
//!
//! This module provides the pieces shared by [`Heap`](crate::heap::Heap) and
//! [`PriorityQueue`](crate::priority_queue::PriorityQueue):
//!
//! - [`Comparator`]: the ordering policy, stored by value at construction
//! - [`MinOrder`] / [`MaxOrder`]: ready-made policies for `Ord` types
//! - [`PriorityContainer`]: the push/peek/pop surface both containers expose
//! - [`HeapError`] and [`Slot`]: checked access through generation-tagged indices

use std::fmt;

/// Error type for checked slot operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap was mutated after the slot was obtained
    StaleSlot {
        /// Generation recorded in the slot
        slot: u64,
        /// Generation of the heap at the time of the call
        current: u64,
    },
    /// The slot index does not address an element
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of elements in the heap
        len: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::StaleSlot { slot, current } => {
                write!(
                    f,
                    "slot is stale (taken at generation {}, heap is at generation {})",
                    slot, current
                )
            }
            HeapError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} is out of bounds for heap of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A position in a heap, tagged with the generation it was observed at
///
/// Plain `usize` indices returned by `first_index` become meaningless after
/// any mutation, and nothing stops a caller from reusing them. A `Slot`
/// remembers the heap's generation so that `remove_slot` and `replace_slot`
/// can refuse it once the heap has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl Slot {
    /// Storage index this slot pointed at when it was created
    pub fn index(&self) -> usize {
        self.index
    }

    /// Heap generation this slot was created at
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Ordering policy for a heap
///
/// `before(a, b)` returns true when `a` may sit above `b` in the tree, i.e.
/// `a` is not out of place as the parent of `b`. The root of a heap is
/// therefore the extremal element under `before`.
///
/// Any `Fn(&T, &T) -> bool` is a comparator:
///
/// ```rust
/// use rust_comparator_heaps::heap::Heap;
///
/// let mut heap = Heap::new(|a: &u32, b: &u32| a > b);
/// heap.push(3);
/// heap.push(9);
/// assert_eq!(heap.peek(), Some(&9));
/// ```
pub trait Comparator<T> {
    /// Returns true if `a` is allowed to be the parent of `b`
    fn before(&self, a: &T, b: &T) -> bool;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Smallest element at the root (`a < b`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MinOrder;

impl<T: Ord> Comparator<T> for MinOrder {
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Largest element at the root (`a > b`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaxOrder;

impl<T: Ord> Comparator<T> for MaxOrder {
    #[inline]
    fn before(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

/// Base trait for the priority containers in this crate
///
/// Both [`Heap`](crate::heap::Heap) and
/// [`PriorityQueue`](crate::priority_queue::PriorityQueue) implement it, so
/// code that only needs push/peek/pop can be written once.
///
/// # Example
///
/// ```rust
/// use rust_comparator_heaps::{PriorityContainer, MinOrder};
/// use rust_comparator_heaps::priority_queue::PriorityQueue;
///
/// fn drain_all<Q: PriorityContainer<i32>>(mut q: Q) -> Vec<i32> {
///     let mut out = Vec::new();
///     while let Some(x) = q.pop() {
///         out.push(x);
///     }
///     out
/// }
///
/// let mut queue = PriorityQueue::new(MinOrder);
/// queue.enqueue(2);
/// queue.enqueue(1);
/// assert_eq!(drain_all(queue), vec![1, 2]);
/// ```
pub trait PriorityContainer<T> {
    /// Returns true if the container holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of elements
    fn len(&self) -> usize;

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n)
    fn push(&mut self, element: T);

    /// Returns the root element without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the root element
    ///
    /// # Time Complexity
    /// O(log n)
    fn pop(&mut self) -> Option<T>;
}
