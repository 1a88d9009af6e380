use std::{collections::HashMap, hash::Hash};

use crate::error::PqError;

/// A binary min-heap over distinct items that allows efficient priority updates by item.
///
/// Items only need `Hash + Eq`; the ordering comes entirely from the attached `f64` priorities.
/// NaN priorities are rejected so that priorities stay totally ordered.
#[derive(Debug, Clone)]
pub struct IndexedMinPQ<T> {
    /// The array representation of the heap.
    heap: Vec<Entry<T>>,
    /// Mapping from item to its index in the heap.
    item_to_heap_idx: HashMap<T, usize>,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    priority: f64,
}

impl<T: Hash + Eq + Clone> IndexedMinPQ<T> {
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        IndexedMinPQ {
            heap: Vec::with_capacity(capacity),
            item_to_heap_idx: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Checks whether the queue contains the given item.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.item_to_heap_idx.contains_key(item)
    }

    /// Returns the current priority of `item`, if it is queued.
    pub fn priority_of(&self, item: &T) -> Option<f64> {
        self.item_to_heap_idx
            .get(item)
            .map(|&idx| self.heap[idx].priority)
    }

    /// Inserts a new item with the given priority.
    pub fn add(&mut self, item: T, priority: f64) -> Result<(), PqError> {
        if priority.is_nan() {
            return Err(PqError::InvalidPriority(priority));
        }
        if self.contains(&item) {
            return Err(PqError::DuplicateItem);
        }

        let idx = self.heap.len();
        self.item_to_heap_idx.insert(item.clone(), idx);
        self.heap.push(Entry { item, priority });
        self.sift_up(idx);
        Ok(())
    }

    /// Returns the item with the lowest priority without removing it.
    pub fn get_smallest(&self) -> Result<&T, PqError> {
        self.heap
            .first()
            .map(|entry| &entry.item)
            .ok_or(PqError::Empty)
    }

    /// Removes and returns the item with the lowest priority.
    pub fn remove_smallest(&mut self) -> Result<T, PqError> {
        if self.heap.is_empty() {
            return Err(PqError::Empty);
        }

        // Move the last entry to the root and sift it down
        let last = self.heap.len() - 1;
        self.swap_entries(0, last);
        let smallest = self.heap.pop().ok_or(PqError::Empty)?;
        self.item_to_heap_idx.remove(&smallest.item);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok(smallest.item)
    }

    /// Sets the priority of a queued item and restores the heap order around it.
    pub fn change_priority(&mut self, item: &T, priority: f64) -> Result<(), PqError> {
        if priority.is_nan() {
            return Err(PqError::InvalidPriority(priority));
        }
        let idx = *self
            .item_to_heap_idx
            .get(item)
            .ok_or(PqError::NoSuchItem)?;

        let old_priority = std::mem::replace(&mut self.heap[idx].priority, priority);
        if priority < old_priority {
            self.sift_up(idx);
        } else if priority > old_priority {
            self.sift_down(idx);
        }
        Ok(())
    }

    /// Moves the entry at `idx` towards the root while it is strictly smaller than its parent.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent_idx = Self::parent_of(idx);
            if self.heap[idx].priority >= self.heap[parent_idx].priority {
                break; // Parent is not larger => heap property satisfied
            }

            self.swap_entries(idx, parent_idx);
            idx = parent_idx;
        }
    }

    /// Moves the entry at `idx` towards the leaves while a child is strictly smaller.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = Self::left_child_of(idx);
            if left >= len {
                break; // No children
            }
            let right = left + 1;

            // Pick the smaller child. Equal children resolve to the right one.
            let mut best_child_idx = left;
            if right < len && self.heap[right].priority <= self.heap[left].priority {
                best_child_idx = right;
            }

            if self.heap[best_child_idx].priority >= self.heap[idx].priority {
                break; // No child is smaller => heap property satisfied
            }

            self.swap_entries(idx, best_child_idx);
            idx = best_child_idx;
        }
    }

    /// Swaps two heap slots and updates the index of both items accordingly.
    #[inline]
    fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.sync_index(a);
        self.sync_index(b);
    }

    #[inline]
    fn sync_index(&mut self, idx: usize) {
        let slot = self.item_to_heap_idx.get_mut(&self.heap[idx].item);
        debug_assert!(slot.is_some(), "heap entry missing from the item index");
        if let Some(slot) = slot {
            *slot = idx;
        }
    }

    #[inline(always)]
    fn parent_of(idx: usize) -> usize {
        (idx - 1) >> 1
    }

    #[inline(always)]
    fn left_child_of(idx: usize) -> usize {
        (idx << 1) + 1
    }
}

impl<T: Hash + Eq + Clone> Default for IndexedMinPQ<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastrand::Rng;

    fn assert_invariants<T: Hash + Eq + Clone + std::fmt::Debug>(pq: &IndexedMinPQ<T>) {
        assert_eq!(pq.heap.len(), pq.item_to_heap_idx.len());
        for (idx, entry) in pq.heap.iter().enumerate() {
            assert_eq!(
                pq.item_to_heap_idx.get(&entry.item),
                Some(&idx),
                "index of {:?} is stale",
                entry.item
            );
            if idx > 0 {
                let parent = &pq.heap[IndexedMinPQ::<T>::parent_of(idx)];
                assert!(
                    parent.priority <= entry.priority,
                    "heap order violated at slot {}: {} > {}",
                    idx,
                    parent.priority,
                    entry.priority
                );
            }
        }
    }

    fn snapshot(pq: &IndexedMinPQ<char>) -> Vec<(char, f64)> {
        pq.heap.iter().map(|e| (e.item, e.priority)).collect()
    }

    #[test]
    fn test_decrease_key() {
        let mut pq = IndexedMinPQ::new();
        pq.add('x', 10.0).unwrap();
        pq.add('y', 5.0).unwrap();
        pq.change_priority(&'x', 1.0).unwrap();

        assert_invariants(&pq);
        assert_eq!(pq.remove_smallest(), Ok('x'));
        assert_eq!(pq.remove_smallest(), Ok('y'));
        assert!(pq.is_empty());
    }

    #[test]
    fn test_increase_key() {
        let mut pq = IndexedMinPQ::new();
        for (i, c) in "abcdefg".chars().enumerate() {
            pq.add(c, i as f64).unwrap();
        }
        pq.change_priority(&'a', 100.0).unwrap();

        assert_invariants(&pq);
        assert_eq!(pq.get_smallest(), Ok(&'b'));
        assert_eq!(pq.priority_of(&'a'), Some(100.0));
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut pq = IndexedMinPQ::new();
        pq.add('x', 1.0).unwrap();

        assert_eq!(pq.add('x', 2.0), Err(PqError::DuplicateItem));
        assert_eq!(pq.len(), 1);
        assert_eq!(pq.priority_of(&'x'), Some(1.0));
        assert_invariants(&pq);
    }

    #[test]
    fn test_empty_queue_errors() {
        let mut pq: IndexedMinPQ<u32> = IndexedMinPQ::default();

        assert_eq!(pq.get_smallest(), Err(PqError::Empty));
        assert_eq!(pq.remove_smallest(), Err(PqError::Empty));
        assert_eq!(pq.change_priority(&7, 1.0), Err(PqError::NoSuchItem));
        assert!(!pq.contains(&7));
        assert_eq!(pq.len(), 0);
    }

    #[test]
    fn test_nan_priority_rejected() {
        let mut pq = IndexedMinPQ::new();
        assert!(matches!(
            pq.add('a', f64::NAN),
            Err(PqError::InvalidPriority(p)) if p.is_nan()
        ));
        assert!(pq.is_empty());

        pq.add('a', 3.0).unwrap();
        assert!(pq.change_priority(&'a', f64::NAN).is_err());
        assert_eq!(pq.priority_of(&'a'), Some(3.0));
    }

    #[test]
    fn test_unchanged_priority_is_noop() {
        let mut pq = IndexedMinPQ::new();
        for (c, p) in [('a', 4.0), ('b', 2.0), ('c', 2.0), ('d', 7.0), ('e', 1.0)] {
            pq.add(c, p).unwrap();
        }
        let before = snapshot(&pq);

        pq.change_priority(&'b', 2.0).unwrap();
        pq.change_priority(&'e', 1.0).unwrap();

        assert_eq!(snapshot(&pq), before);
    }

    #[test]
    fn test_sink_prefers_right_child_on_tie() {
        let mut pq = IndexedMinPQ::new();
        pq.add('r', 0.0).unwrap();
        pq.add('x', 5.0).unwrap();
        pq.add('y', 5.0).unwrap();
        pq.add('z', 9.0).unwrap();

        assert_eq!(pq.remove_smallest(), Ok('r'));
        assert_eq!(pq.get_smallest(), Ok(&'y'));
        assert_eq!(pq.remove_smallest(), Ok('y'));
        assert_eq!(pq.remove_smallest(), Ok('x'));
        assert_eq!(pq.remove_smallest(), Ok('z'));
    }

    #[test]
    fn test_extraction_order_on_random_ops() {
        let mut rng = Rng::new();
        println!("Seed: {}", rng.get_seed());

        for _ in 0..50 {
            let mut pq = IndexedMinPQ::new();
            let mut expected: HashMap<u32, f64> = HashMap::new();

            for _ in 0..300 {
                let item = rng.u32(0..100);
                let priority = rng.f64() * 1000.0;
                match rng.u8(0..4) {
                    0 | 1 => {
                        let res = pq.add(item, priority);
                        if expected.contains_key(&item) {
                            assert_eq!(res, Err(PqError::DuplicateItem));
                        } else {
                            assert_eq!(res, Ok(()));
                            expected.insert(item, priority);
                        }
                    }
                    2 => {
                        let res = pq.change_priority(&item, priority);
                        if let Some(p) = expected.get_mut(&item) {
                            assert_eq!(res, Ok(()));
                            *p = priority;
                        } else {
                            assert_eq!(res, Err(PqError::NoSuchItem));
                        }
                    }
                    _ => match pq.remove_smallest() {
                        Ok(item) => {
                            let p = expected.remove(&item).unwrap();
                            assert!(expected.values().all(|&other| other >= p));
                        }
                        Err(e) => {
                            assert_eq!(e, PqError::Empty);
                            assert!(expected.is_empty());
                        }
                    },
                }
                assert_invariants(&pq);
                assert_eq!(pq.len(), expected.len());
            }

            // Drain and check the order
            let mut last = f64::NEG_INFINITY;
            while let Ok(item) = pq.remove_smallest() {
                let p = expected.remove(&item).unwrap();
                assert!(p >= last, "{} extracted after {}", p, last);
                last = p;
                assert_invariants(&pq);
            }
            assert!(expected.is_empty());
        }
    }
}
