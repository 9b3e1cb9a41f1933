//! Comparator-driven binary heap
//!
//! A binary heap stored as a dense `Vec<T>` whose ordering is decided by a
//! [`Comparator`] value captured at construction. Besides the usual
//! push/peek/pop it supports removal and replacement at an arbitrary storage
//! index, which is what makes it usable as a priority queue with priority
//! updates.
//!
//! # Time Complexity
//!
//! | Operation       | Complexity |
//! |-----------------|------------|
//! | `push`          | O(log n)   |
//! | `pop`           | O(log n)   |
//! | `peek`          | O(1)       |
//! | `from_vec`      | O(n)       |
//! | `remove_at`     | O(log n)   |
//! | `replace_at`    | O(log n)   |
//! | `first_index`   | O(n)       |
//! | `remove_first`  | O(n)       |
//!
//! # Indices
//!
//! Indices handed out by [`Heap::first_index`] and [`Heap::index_of`] refer to
//! storage positions and are only meaningful until the next mutating call.
//! [`Heap::locate`] returns a [`Slot`] instead, which carries the heap's
//! generation so that [`Heap::remove_slot`] and [`Heap::replace_slot`] can
//! detect stale positions.
//!
//! # Example
//!
//! ```rust
//! use rust_comparator_heaps::heap::Heap;
//! use rust_comparator_heaps::MaxOrder;
//!
//! let mut heap = Heap::from_vec(vec![100, 50, 70, 10, 20, 60, 65], MaxOrder);
//! assert_eq!(heap.peek(), Some(&100));
//! assert_eq!(heap.remove_at(5), Some(60));
//! assert_eq!(heap.pop(), Some(100));
//! assert_eq!(heap.len(), 5);
//! ```

use crate::traits::{Comparator, HeapError, PriorityContainer, Slot};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

/// A binary heap ordered by a caller-supplied [`Comparator`]
///
/// For every node `i` with a child `c`, `order.before(&nodes[i], &nodes[c])`
/// holds, so the root is the extremal element under `before`.
#[derive(Clone)]
pub struct Heap<T, C> {
    /// Backing storage in level order
    nodes: Vec<T>,
    /// Ordering policy
    order: C,
    /// Bumped by every successful mutation, used to validate slots
    generation: u64,
}

impl<T, C: Comparator<T>> Heap<T, C> {
    /// Creates an empty heap ordered by `order`
    pub fn new(order: C) -> Self {
        Heap {
            nodes: Vec::new(),
            order,
            generation: 0,
        }
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize, order: C) -> Self {
        Heap {
            nodes: Vec::with_capacity(capacity),
            order,
            generation: 0,
        }
    }

    /// Builds a heap from `nodes` in O(n)
    ///
    /// The elements are taken in input order and heapified bottom-up, sifting
    /// down from the last internal node to the root.
    ///
    /// ```rust
    /// use rust_comparator_heaps::heap::Heap;
    ///
    /// let heap = Heap::from_vec(vec![4, 1, 3, 2, 16, 9, 10, 14, 8, 7], |a: &i32, b: &i32| a > b);
    /// assert_eq!(heap.peek(), Some(&16));
    /// ```
    pub fn from_vec(nodes: Vec<T>, order: C) -> Self {
        let mut heap = Heap {
            nodes,
            order,
            generation: 0,
        };
        heap.heapify();
        heap
    }

    /// Inserts an element
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn push(&mut self, element: T) {
        self.nodes.push(element);
        self.sift_up(self.nodes.len() - 1);
        self.bump();
    }

    /// Removes and returns the root element, or `None` if the heap is empty
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn pop(&mut self) -> Option<T> {
        let root = match self.nodes.len() {
            0 => return None,
            1 => self.nodes.pop(),
            len => {
                // swap_remove moves the last element into the root slot
                let root = self.nodes.swap_remove(0);
                self.sift_down(0, len - 1);
                Some(root)
            }
        };
        self.bump();
        root
    }

    /// Removes and returns the element at storage position `index`
    ///
    /// Returns `None` and leaves the heap untouched if `index` is out of
    /// bounds.
    ///
    /// The target is swapped with the last element, the moved element is
    /// sifted down and then up (it may violate the order in either
    /// direction), and the last slot is popped.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let len = self.nodes.len();
        if index >= len {
            return None;
        }

        let last = len - 1;
        if index != last {
            self.nodes.swap(index, last);
            self.sift_down(index, last);
            self.sift_up(index);
        }

        let removed = self.nodes.pop();
        self.bump();
        removed
    }

    /// Replaces the element at storage position `index` with `element`
    ///
    /// This is a removal at `index` followed by an insertion, so `element`
    /// ends up wherever the heap order places it, not necessarily at
    /// `index`. Returns the displaced element. If `index` is out of bounds
    /// the heap is untouched, `element` is dropped and `None` is returned.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn replace_at(&mut self, index: usize, element: T) -> Option<T> {
        let displaced = self.remove_at(index)?;
        self.push(element);
        Some(displaced)
    }

    /// Removes the first element (in storage order) matching `predicate`
    ///
    /// # Time Complexity
    /// O(n)
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.first_index(predicate)?;
        self.remove_at(index)
    }

    /// Like [`remove_first`](Self::remove_first) with a fallible predicate
    ///
    /// The scan finishes before anything is mutated, so an error from
    /// `predicate` leaves the heap unchanged.
    pub fn try_remove_first<E, P>(&mut self, predicate: P) -> Result<Option<T>, E>
    where
        P: FnMut(&T) -> Result<bool, E>,
    {
        Ok(match self.try_first_index(predicate)? {
            Some(index) => self.remove_at(index),
            None => None,
        })
    }

    /// Removes the element a [`Slot`] points at
    ///
    /// # Errors
    /// Returns [`HeapError::StaleSlot`] if the heap was mutated since the
    /// slot was obtained.
    pub fn remove_slot(&mut self, slot: Slot) -> Result<T, HeapError> {
        let index = self.check_slot(slot)?;
        self.remove_at(index).ok_or(HeapError::IndexOutOfBounds {
            index,
            len: self.nodes.len(),
        })
    }

    /// Replaces the element a [`Slot`] points at, returning the old element
    ///
    /// # Errors
    /// Returns [`HeapError::StaleSlot`] if the heap was mutated since the
    /// slot was obtained.
    pub fn replace_slot(&mut self, slot: Slot, element: T) -> Result<T, HeapError> {
        let index = self.check_slot(slot)?;
        let len = self.nodes.len();
        self.replace_at(index, element)
            .ok_or(HeapError::IndexOutOfBounds { index, len })
    }

    /// Returns true if every parent/child pair respects the ordering
    ///
    /// A pair is only rejected when the child is strictly before the parent,
    /// so strict comparators such as `<` accept equal elements.
    ///
    /// # Time Complexity
    /// O(n)
    pub fn is_heap(&self) -> bool {
        (1..self.nodes.len()).all(|child| {
            let parent = (child - 1) / 2;
            let (p, c) = (&self.nodes[parent], &self.nodes[child]);
            self.order.before(p, c) || !self.order.before(c, p)
        })
    }

    /// Returns a draining iterator yielding elements in removal order
    ///
    /// The heap is empty once the iterator is exhausted or dropped.
    ///
    /// ```rust
    /// use rust_comparator_heaps::heap::Heap;
    /// use rust_comparator_heaps::MinOrder;
    ///
    /// let mut heap = Heap::from_vec(vec![3, 1, 2], MinOrder);
    /// let first_two: Vec<_> = heap.drain_sorted().take(2).collect();
    /// assert_eq!(first_two, vec![1, 2]);
    /// assert!(heap.is_empty());
    /// ```
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, yielding elements in removal order
    pub fn into_sorted_iter(self) -> IntoSorted<T, C> {
        IntoSorted { heap: self }
    }

    /// Consumes the heap, collecting its elements in removal order
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.into_sorted_iter().collect()
    }

    /// Iterates a copy of the heap in removal order, leaving `self` intact
    pub fn sorted_snapshot(&self) -> IntoSorted<T, C>
    where
        T: Clone,
        C: Clone,
    {
        IntoSorted { heap: self.clone() }
    }

    fn heapify(&mut self) {
        let len = self.nodes.len();
        for index in (0..len / 2).rev() {
            self.sift_down(index, len);
        }
    }

    /// Move the element at `child` up until its parent may sit above it
    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.order.before(&self.nodes[parent], &self.nodes[child]) {
                break;
            }
            self.nodes.swap(parent, child);
            child = parent;
        }
    }

    /// Move the element at `index` down within `nodes[..end]`
    fn sift_down(&mut self, mut index: usize, end: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut first = index;

            if left < end && !self.order.before(&self.nodes[first], &self.nodes[left]) {
                first = left;
            }
            if right < end && !self.order.before(&self.nodes[first], &self.nodes[right]) {
                first = right;
            }

            if first == index {
                return;
            }
            self.nodes.swap(index, first);
            index = first;
        }
    }
}

impl<T, C> Heap<T, C> {
    /// Returns true if the heap holds no elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the root element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    /// Returns the element at storage position `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)
    }

    /// Returns the element a [`Slot`] points at
    ///
    /// # Errors
    /// Returns [`HeapError::StaleSlot`] if the heap was mutated since the
    /// slot was obtained.
    pub fn get_slot(&self, slot: Slot) -> Result<&T, HeapError> {
        let index = self.check_slot(slot)?;
        Ok(&self.nodes[index])
    }

    /// The backing storage in level order
    pub fn as_slice(&self) -> &[T] {
        &self.nodes
    }

    /// The ordering policy this heap was built with
    pub fn comparator(&self) -> &C {
        &self.order
    }

    /// Number of successful mutations so far (wrapping)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Storage index of the first element matching `predicate`
    ///
    /// The index is only valid until the next mutating call.
    ///
    /// # Time Complexity
    /// O(n)
    pub fn first_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.nodes.iter().position(predicate)
    }

    /// Like [`first_index`](Self::first_index) with a fallible predicate
    ///
    /// The first error returned by `predicate` ends the scan and is passed
    /// through.
    pub fn try_first_index<E, P>(&self, mut predicate: P) -> Result<Option<usize>, E>
    where
        P: FnMut(&T) -> Result<bool, E>,
    {
        for (index, node) in self.nodes.iter().enumerate() {
            if predicate(node)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Storage index of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.first_index(|node| node == value)
    }

    /// Finds the first element matching `predicate` and returns a [`Slot`]
    /// that stays checkable across later mutations
    pub fn locate<P>(&self, predicate: P) -> Option<Slot>
    where
        P: FnMut(&T) -> bool,
    {
        self.first_index(predicate).map(|index| Slot {
            index,
            generation: self.generation,
        })
    }

    /// Removes every element
    pub fn clear(&mut self) {
        if !self.nodes.is_empty() {
            self.nodes.clear();
            self.bump();
        }
    }

    /// Consumes the heap, returning the backing storage in level order
    pub fn into_vec(self) -> Vec<T> {
        self.nodes
    }

    fn check_slot(&self, slot: Slot) -> Result<usize, HeapError> {
        if slot.generation != self.generation {
            return Err(HeapError::StaleSlot {
                slot: slot.generation,
                current: self.generation,
            });
        }
        if slot.index >= self.nodes.len() {
            return Err(HeapError::IndexOutOfBounds {
                index: slot.index,
                len: self.nodes.len(),
            });
        }
        Ok(slot.index)
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T, C: Comparator<T>> PriorityContainer<T> for Heap<T, C> {
    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, element: T) {
        Heap::push(self, element)
    }

    fn peek(&self) -> Option<&T> {
        self.nodes.first()
    }

    fn pop(&mut self) -> Option<T> {
        Heap::pop(self)
    }
}

impl<T, C: Default> Default for Heap<T, C> {
    fn default() -> Self {
        Heap {
            nodes: Vec::new(),
            order: C::default(),
            generation: 0,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Heap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("nodes", &self.nodes)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

// Equality and hashing look at the storage sequence only: two heaps holding
// the same elements in different layouts are different.
impl<T: PartialEq, C> PartialEq for Heap<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<T: Eq, C> Eq for Heap<T, C> {}

impl<T: Hash, C> Hash for Heap<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nodes.hash(state);
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for Heap<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Heap::from_vec(iter.into_iter().collect(), C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for Heap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);
        for element in iter {
            self.push(element);
        }
    }
}

/// Draining iterator returned by [`Heap::drain_sorted`]
///
/// Dropping it before exhaustion removes the remaining elements.
pub struct DrainSorted<'a, T, C> {
    heap: &'a mut Heap<T, C>,
}

impl<T, C: Comparator<T>> Iterator for DrainSorted<'_, T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for DrainSorted<'_, T, C> {}

impl<T, C: Comparator<T>> FusedIterator for DrainSorted<'_, T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for DrainSorted<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DrainSorted").field(&self.heap).finish()
    }
}

impl<T, C> Drop for DrainSorted<'_, T, C> {
    fn drop(&mut self) {
        self.heap.clear();
    }
}

/// Owning iterator returned by [`Heap::into_sorted_iter`] and
/// [`Heap::sorted_snapshot`]
pub struct IntoSorted<T, C> {
    heap: Heap<T, C>,
}

impl<T, C: Comparator<T>> Iterator for IntoSorted<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T, C: Comparator<T>> ExactSizeIterator for IntoSorted<T, C> {}

impl<T, C: Comparator<T>> FusedIterator for IntoSorted<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for IntoSorted<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoSorted").field(&self.heap).finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Heap;
    use crate::traits::Comparator;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize, C> Serialize for Heap<T, C> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.nodes.serialize(serializer)
        }
    }

    // Input is re-heapified, so any sequence loads into a valid heap.
    impl<'de, T, C> Deserialize<'de> for Heap<T, C>
    where
        T: Deserialize<'de>,
        C: Comparator<T> + Default,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let nodes = Vec::<T>::deserialize(deserializer)?;
            Ok(Heap::from_vec(nodes, C::default()))
        }
    }
}
