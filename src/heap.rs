//! Mutable-priority binary min-heap with hash-indexed decrease-key.
//!
//! [`BinaryHeap`] keeps a parallel hash-map from element identity to array
//! index, updated in lockstep on every swap, so decrease-key (here,
//! [`BinaryHeap::increase_priority`]; "increase priority" because this is a
//! min-heap) locates the target in O(1) and restores the heap property in
//! O(log n). `position[k]` always names `k`'s true slot.
//!
//! A key's identity (the hash index, and "does an equal element already
//! reside") and its priority (heap ordering) may be the same value, as in
//! the plain-integer scenarios below, or may be different fields of a
//! composite key whose `Eq`/`Hash` look only at identity while `Ord` looks
//! only at priority; [`crate::dijkstra`] keys by voxel identity while
//! ordering by squared distance.

use std::collections::HashMap;
use std::hash::Hash;

use error_stack::report;

use crate::error::{Error, Result};

/// How to locate the element an [`BinaryHeap::increase_priority`] call
/// should target: either its current array position, or a key equal to it
/// (both forms are accepted).
#[derive(Clone, Copy, Debug)]
pub enum Locator<'a, K> {
    /// The element's current position in the heap's backing array.
    Position(usize),
    /// A key equal (by identity) to the element to update.
    Key(&'a K),
}

/// An array-backed binary min-heap with `O(1)` identity-based lookup.
#[derive(Clone, Debug)]
pub struct BinaryHeap<K> {
    array: Vec<K>,
    position: HashMap<K, usize>,
}

impl<K> Default for BinaryHeap<K> {
    fn default() -> Self {
        Self {
            array: Vec::new(),
            position: HashMap::new(),
        }
    }
}

impl<K> BinaryHeap<K>
where
    K: Ord + Eq + Hash + Clone,
{
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements currently in the heap.
    #[must_use]
    pub fn heap_size(&self) -> usize {
        self.array.len()
    }

    /// Whether the heap holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Adds `k` to the heap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an element equal to `k`
    /// already resides in the heap.
    pub fn insert(&mut self, k: K) -> Result<()> {
        if self.position.contains_key(&k) {
            return Err(report!(Error::InvalidArgument(
                "an equal element already resides in the heap".to_string()
            )));
        }
        let idx = self.array.len();
        self.array.push(k.clone());
        self.position.insert(k, idx);
        self.sift_up(idx);
        Ok(())
    }

    /// Returns the minimum-keyed element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if the heap is empty.
    pub fn first(&self) -> Result<&K> {
        self.array
            .first()
            .ok_or_else(|| report!(Error::PreconditionViolation("heap is empty".to_string())))
    }

    /// Removes and returns the minimum-keyed element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if the heap is empty.
    pub fn remove(&mut self) -> Result<K> {
        if self.array.is_empty() {
            return Err(report!(Error::PreconditionViolation(
                "heap is empty".to_string()
            )));
        }
        let last = self.array.len() - 1;
        self.swap_slots(0, last);
        let min = self.array.pop().expect("just checked non-empty");
        self.position.remove(&min);
        if !self.array.is_empty() {
            self.sift_down(0);
        }
        Ok(min)
    }

    /// Replaces the key at the element located by `locator` with `k_new`,
    /// which must compare strictly less than the element's current key,
    /// then restores the heap property by sifting up.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if `locator` does not name
    /// a resident element, or if `k_new` does not compare strictly less
    /// than the element currently at that position.
    pub fn increase_priority(&mut self, locator: Locator<'_, K>, k_new: K) -> Result<()> {
        let idx = match locator {
            Locator::Position(idx) => {
                if idx >= self.array.len() {
                    return Err(report!(Error::PreconditionViolation(format!(
                        "position {idx} does not name a resident element"
                    ))));
                }
                idx
            }
            Locator::Key(key) => *self.position.get(key).ok_or_else(|| {
                report!(Error::PreconditionViolation(
                    "no resident element equal to the given key".to_string()
                ))
            })?,
        };

        if !(k_new < self.array[idx]) {
            return Err(report!(Error::PreconditionViolation(
                "replacement key does not strictly improve the current key".to_string()
            )));
        }

        self.position.remove(&self.array[idx]);
        self.array[idx] = k_new.clone();
        self.position.insert(k_new, idx);
        self.sift_up(idx);
        Ok(())
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.array[idx] < self.array[parent] {
                self.swap_slots(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.array.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;
            if left < len && self.array[left] < self.array[smallest] {
                smallest = left;
            }
            if right < len && self.array[right] < self.array[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.swap_slots(idx, smallest);
            idx = smallest;
        }
    }

    fn swap_slots(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.array.swap(i, j);
        self.position.insert(self.array[i].clone(), i);
        self.position.insert(self.array[j].clone(), j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_of(values: &[i64]) -> BinaryHeap<i64> {
        let mut heap = BinaryHeap::new();
        for &v in values {
            heap.insert(v).unwrap();
        }
        heap
    }

    fn assert_heap_property(heap: &BinaryHeap<i64>) {
        for i in 1..heap.array.len() {
            let parent = (i - 1) / 2;
            assert!(heap.array[parent] <= heap.array[i]);
        }
        for (k, &pos) in &heap.position {
            assert_eq!(&heap.array[pos], k);
        }
    }

    #[test]
    fn scenario_one_first_and_remove_order() {
        let mut heap = heap_of(&[10, 3, 1]);
        assert_eq!(*heap.first().unwrap(), 1);
        assert_eq!(heap.remove().unwrap(), 1);
        assert_eq!(heap.heap_size(), 2);
        assert_eq!(heap.remove().unwrap(), 3);
        assert_eq!(heap.remove().unwrap(), 10);
        assert!(heap.is_empty());
    }

    #[test]
    fn first_does_not_remove() {
        let heap = heap_of(&[10, 3, 1]);
        heap.first().unwrap();
        assert_eq!(heap.heap_size(), 3);
    }

    #[test]
    fn scenario_two_increase_priority_by_position() {
        let mut heap = heap_of(&[3, 1, 10]);
        let pos_of_10 = *heap.position.get(&10).unwrap();
        heap.increase_priority(Locator::Position(pos_of_10), 0).unwrap();
        assert_eq!(heap.remove().unwrap(), 0);
        assert_eq!(heap.remove().unwrap(), 1);
        assert_eq!(heap.remove().unwrap(), 3);
    }

    #[test]
    fn increase_priority_by_key() {
        let mut heap = heap_of(&[3, 1, 10]);
        heap.increase_priority(Locator::Key(&10), 0).unwrap();
        assert_eq!(heap.remove().unwrap(), 0);
    }

    #[test]
    fn scenario_three_non_improving_key_is_a_precondition_violation() {
        let mut heap = heap_of(&[3, 1, 10]);
        let err = heap.increase_priority(Locator::Key(&10), 11).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::PreconditionViolation(_)
        ));
    }

    #[test]
    fn duplicate_insert_is_invalid_argument() {
        let mut heap = heap_of(&[3, 1, 10]);
        let err = heap.insert(3).unwrap_err();
        assert!(matches!(err.current_context(), Error::InvalidArgument(_)));
    }

    #[test]
    fn remove_or_first_on_empty_heap_fails() {
        let mut heap: BinaryHeap<i64> = BinaryHeap::new();
        assert!(matches!(
            heap.first().unwrap_err().current_context(),
            Error::PreconditionViolation(_)
        ));
        assert!(matches!(
            heap.remove().unwrap_err().current_context(),
            Error::PreconditionViolation(_)
        ));
    }

    #[test]
    fn increase_priority_on_unknown_key_fails() {
        let mut heap = heap_of(&[3, 1, 10]);
        let err = heap.increase_priority(Locator::Key(&99), 0).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::PreconditionViolation(_)
        ));
    }

    #[test]
    fn heap_property_holds_through_random_operations() {
        let mut heap = BinaryHeap::new();
        let values = [50, 30, 70, 10, 40, 60, 90, 5, 15, 35, 45];
        for &v in &values {
            heap.insert(v).unwrap();
            assert_heap_property(&heap);
        }
        heap.increase_priority(Locator::Key(&90), 1).unwrap();
        assert_heap_property(&heap);

        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.remove().unwrap());
            assert_heap_property(&heap);
        }
        let mut expected: Vec<i64> = values.to_vec();
        expected.retain(|&v| v != 90);
        expected.push(1);
        expected.sort_unstable();
        assert_eq!(out, expected);
    }
}
