//! Priority queue over [`Heap`]
//!
//! [`PriorityQueue`] gives a heap queue-shaped vocabulary (`enqueue`,
//! `dequeue`, `peek`) and priority adjustment (`update`, `update_first`).
//! It holds nothing but the heap; every call is forwarded unchanged.
//!
//! Updating an element's priority is done by replacing it: the old element is
//! removed from its position and the new one inserted, so the replacement
//! lands wherever the ordering puts it.
//!
//! # Example
//!
//! ```rust
//! use rust_comparator_heaps::priority_queue::PriorityQueue;
//!
//! // Tasks as (deadline, name), earliest deadline first
//! let mut queue = PriorityQueue::new(|a: &(u32, char), b: &(u32, char)| a.0 < b.0);
//! queue.enqueue((30, 'a'));
//! queue.enqueue((10, 'b'));
//! queue.enqueue((20, 'c'));
//!
//! // 'a' became urgent
//! assert_eq!(queue.update_first(|t| t.1 == 'a', (5, 'a')), Some((30, 'a')));
//!
//! assert_eq!(queue.dequeue(), Some((5, 'a')));
//! assert_eq!(queue.dequeue(), Some((10, 'b')));
//! assert_eq!(queue.peek(), Some(&(20, 'c')));
//! ```

use crate::heap::{DrainSorted, Heap, IntoSorted};
use crate::traits::{Comparator, HeapError, PriorityContainer, Slot};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A priority queue backed by a binary [`Heap`]
///
/// Equality and hashing follow the heap: two queues are equal when their
/// backing storage sequences are.
#[derive(Clone)]
pub struct PriorityQueue<T, C> {
    heap: Heap<T, C>,
}

impl<T, C: Comparator<T>> PriorityQueue<T, C> {
    /// Creates an empty queue ordered by `order`
    pub fn new(order: C) -> Self {
        PriorityQueue {
            heap: Heap::new(order),
        }
    }

    /// Creates an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize, order: C) -> Self {
        PriorityQueue {
            heap: Heap::with_capacity(capacity, order),
        }
    }

    /// Builds a queue from `elements` in O(n)
    pub fn from_vec(elements: Vec<T>, order: C) -> Self {
        PriorityQueue {
            heap: Heap::from_vec(elements, order),
        }
    }

    /// Adds an element
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn enqueue(&mut self, element: T) {
        self.heap.push(element);
    }

    /// Removes and returns the highest-priority element
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop()
    }

    /// Replaces the element at storage position `index`
    ///
    /// Returns the old element, or `None` (dropping `element`) if `index` is
    /// out of bounds.
    ///
    /// # Time Complexity
    /// O(log n)
    pub fn update(&mut self, index: usize, element: T) -> Option<T> {
        self.heap.replace_at(index, element)
    }

    /// Replaces the first element (in storage order) matching `predicate`
    ///
    /// # Time Complexity
    /// O(n)
    pub fn update_first<P>(&mut self, predicate: P, element: T) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let index = self.heap.first_index(predicate)?;
        self.heap.replace_at(index, element)
    }

    /// Like [`update_first`](Self::update_first) with a fallible predicate
    ///
    /// An error from `predicate` is returned before anything is changed.
    pub fn try_update_first<E, P>(&mut self, predicate: P, element: T) -> Result<Option<T>, E>
    where
        P: FnMut(&T) -> Result<bool, E>,
    {
        Ok(match self.heap.try_first_index(predicate)? {
            Some(index) => self.heap.replace_at(index, element),
            None => None,
        })
    }

    /// Replaces the first element equal to `current`
    pub fn update_first_equal(&mut self, current: &T, element: T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.heap.index_of(current)?;
        self.heap.replace_at(index, element)
    }

    /// Replaces the element a [`Slot`] points at
    ///
    /// # Errors
    /// Returns [`HeapError::StaleSlot`] if the queue changed since the slot
    /// was obtained.
    pub fn update_slot(&mut self, slot: Slot, element: T) -> Result<T, HeapError> {
        self.heap.replace_slot(slot, element)
    }

    /// Removes the element at storage position `index`
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.heap.remove_at(index)
    }

    /// Removes the first element (in storage order) matching `predicate`
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.heap.remove_first(predicate)
    }

    /// Removes the element a [`Slot`] points at
    ///
    /// # Errors
    /// Returns [`HeapError::StaleSlot`] if the queue changed since the slot
    /// was obtained.
    pub fn remove_slot(&mut self, slot: Slot) -> Result<T, HeapError> {
        self.heap.remove_slot(slot)
    }

    /// Dequeues everything lazily, in priority order
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, C> {
        self.heap.drain_sorted()
    }

    /// Consumes the queue, yielding elements in priority order
    pub fn into_sorted_iter(self) -> IntoSorted<T, C> {
        self.heap.into_sorted_iter()
    }

    /// Iterates a copy of the queue in priority order
    pub fn sorted_snapshot(&self) -> IntoSorted<T, C>
    where
        T: Clone,
        C: Clone,
    {
        self.heap.sorted_snapshot()
    }
}

impl<T, C> PriorityQueue<T, C> {
    /// Returns true if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of queued elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the highest-priority element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Storage index of the first element matching `predicate`
    ///
    /// Only valid until the next mutating call.
    pub fn first_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.heap.first_index(predicate)
    }

    /// Storage index of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.heap.index_of(value)
    }

    /// Finds the first element matching `predicate` as a checkable [`Slot`]
    pub fn locate<P>(&self, predicate: P) -> Option<Slot>
    where
        P: FnMut(&T) -> bool,
    {
        self.heap.locate(predicate)
    }

    /// Number of successful mutations so far (wrapping)
    pub fn generation(&self) -> u64 {
        self.heap.generation()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// The underlying heap
    pub fn as_heap(&self) -> &Heap<T, C> {
        &self.heap
    }

    /// Consumes the queue, returning the underlying heap
    pub fn into_heap(self) -> Heap<T, C> {
        self.heap
    }
}

impl<T, C: Comparator<T>> PriorityContainer<T> for PriorityQueue<T, C> {
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, element: T) {
        self.enqueue(element)
    }

    fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    fn pop(&mut self) -> Option<T> {
        self.dequeue()
    }
}

impl<T, C> From<Heap<T, C>> for PriorityQueue<T, C> {
    fn from(heap: Heap<T, C>) -> Self {
        PriorityQueue { heap }
    }
}

impl<T, C: Default> Default for PriorityQueue<T, C> {
    fn default() -> Self {
        PriorityQueue {
            heap: Heap::default(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}

impl<T: PartialEq, C> PartialEq for PriorityQueue<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.heap == other.heap
    }
}

impl<T: Eq, C> Eq for PriorityQueue<T, C> {}

impl<T: Hash, C> Hash for PriorityQueue<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.heap.hash(state);
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for PriorityQueue<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        PriorityQueue {
            heap: iter.into_iter().collect(),
        }
    }
}

impl<T, C: Comparator<T>> Extend<T> for PriorityQueue<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.heap.extend(iter);
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::PriorityQueue;
    use crate::heap::Heap;
    use crate::traits::Comparator;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl<T: Serialize, C> Serialize for PriorityQueue<T, C> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.heap.serialize(serializer)
        }
    }

    impl<'de, T, C> Deserialize<'de> for PriorityQueue<T, C>
    where
        T: Deserialize<'de>,
        C: Comparator<T> + Default,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Heap::deserialize(deserializer).map(PriorityQueue::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MaxOrder, MinOrder};

    #[test]
    fn test_basic_operations() {
        let mut queue = PriorityQueue::new(MinOrder);

        assert!(queue.is_empty());
        assert_eq!(queue.peek(), None);

        queue.enqueue(5);
        queue.enqueue(1);
        queue.enqueue(10);
        queue.enqueue(3);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek(), Some(&1));

        assert_eq!(queue.dequeue(), Some(1));
        assert_eq!(queue.dequeue(), Some(3));
        assert_eq!(queue.dequeue(), Some(5));
        assert_eq!(queue.dequeue(), Some(10));
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_update_at_index() {
        let mut queue = PriorityQueue::from_vec(vec![100, 50, 70, 10, 20, 60, 65], MaxOrder);

        assert_eq!(queue.update(1, 5), Some(50));
        assert_eq!(queue.as_heap().as_slice(), &[100, 65, 70, 10, 20, 60, 5]);

        assert_eq!(queue.update(7, 1000), None);
        assert_eq!(queue.len(), 7);
        assert_eq!(queue.peek(), Some(&100));
    }

    #[test]
    fn test_update_first_equal() {
        let mut queue = PriorityQueue::new(MinOrder);
        queue.extend([4, 8, 15, 16, 23, 42]);

        assert_eq!(queue.update_first_equal(&23, 1), Some(23));
        assert_eq!(queue.peek(), Some(&1));
        assert_eq!(queue.update_first_equal(&99, 0), None);

        let drained: Vec<_> = queue.drain_sorted().collect();
        assert_eq!(drained, vec![1, 4, 8, 15, 16, 42]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_update_first_leaves_queue_on_error() {
        let mut queue = PriorityQueue::from_vec(vec![3, 9, 4], MinOrder);
        let before = queue.clone();

        let result = queue.try_update_first(|&x| if x == 9 { Err("bad") } else { Ok(false) }, 0);
        assert_eq!(result, Err("bad"));
        assert_eq!(queue, before);

        let result: Result<_, &str> = queue.try_update_first(|&x| Ok(x == 9), 0);
        assert_eq!(result, Ok(Some(9)));
        assert_eq!(queue.peek(), Some(&0));
    }

    #[test]
    fn test_update_slot() {
        let mut queue = PriorityQueue::from_vec(vec![3, 9, 4], MinOrder);

        let slot = queue.locate(|&x| x == 9).unwrap();
        assert_eq!(queue.update_slot(slot, 1), Ok(9));
        assert!(matches!(
            queue.update_slot(slot, 2),
            Err(HeapError::StaleSlot { .. })
        ));
        assert_eq!(queue.into_sorted_iter().collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn test_matches_heap() {
        let input = [7, 2, 9, 4, 4, 1, 8];
        let mut queue = PriorityQueue::new(MaxOrder);
        let mut heap = Heap::new(MaxOrder);

        for x in input {
            queue.enqueue(x);
            heap.push(x);
            assert_eq!(queue.as_heap(), &heap);
        }

        while !heap.is_empty() {
            assert_eq!(queue.dequeue(), heap.pop());
        }
        assert_eq!(queue.dequeue(), None);
    }
}
