/*
Binary min-heap over a fixed universe of dense node ids, with a companion
position index (node id -> heap slot) so that membership is O(1) and an
already-queued id's priority can be lowered in O(log n).

Equal priorities are ordered by ascending node id, i.e. comparison is
lexicographic on (priority, id), so pop order is deterministic for a given
operation sequence.
*/

use crate::graph::NodeId;

#[derive(Debug)]
pub struct IndexedMinHeap {
    heap: Vec<NodeId>,
    pos: Vec<Option<usize>>,
    priority: Vec<u64>,
}

impl IndexedMinHeap {
    /// Empty heap able to hold ids in `0..universe`.
    pub fn with_universe(universe: usize) -> Self {
        Self {
            heap: Vec::with_capacity(universe),
            pos: vec![None; universe],
            priority: vec![u64::MAX; universe],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.pos[id].is_some()
    }

    pub fn peek(&self) -> Option<(NodeId, u64)> {
        self.heap.first().map(|&id| (id, self.priority[id]))
    }

    /// Queues `id` at `priority`. Callers must check `contains` first; a
    /// duplicate insert is a precondition violation.
    pub fn insert(&mut self, id: NodeId, priority: u64) {
        assert!(self.pos[id].is_none(), "node {} is already queued", id);
        self.priority[id] = priority;
        self.pos[id] = Some(self.heap.len());
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
    }

    /// Lowers a queued id's priority and restores heap order. Calling this
    /// for an absent id, or with a priority above the current one, is a
    /// precondition violation.
    pub fn decrease_key(&mut self, id: NodeId, priority: u64) {
        let slot = self.pos[id].expect("decrease_key on a node that is not queued");
        assert!(
            priority <= self.priority[id],
            "decrease_key raised priority of node {}: {} -> {}",
            id,
            self.priority[id],
            priority
        );
        self.priority[id] = priority;
        self.sift_up(slot);
    }

    /// Removes and returns the minimum-priority id, or `None` when empty.
    pub fn pop(&mut self) -> Option<(NodeId, u64)> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        self.pos[min] = None;
        if let Some(&moved) = self.heap.first() {
            self.pos[moved] = Some(0);
            self.sift_down(0);
        }
        Some((min, self.priority[min]))
    }

    fn before(&self, a: NodeId, b: NodeId) -> bool {
        (self.priority[a], a) < (self.priority[b], b)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.before(self.heap[slot], self.heap[parent]) {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.heap.len() && self.before(self.heap[right], self.heap[left]) {
                child = right;
            }
            if !self.before(self.heap[child], self.heap[slot]) {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a]] = Some(a);
        self.pos[self.heap[b]] = Some(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn pops_in_priority_order() {
        let mut heap = IndexedMinHeap::with_universe(8);
        heap.insert(0, 30);
        heap.insert(1, 10);
        heap.insert(2, 50);
        heap.insert(3, 20);
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.peek(), Some((1, 10)));
        assert_eq!(heap.pop(), Some((1, 10)));
        assert_eq!(heap.pop(), Some((3, 20)));
        assert_eq!(heap.pop(), Some((0, 30)));
        assert_eq!(heap.pop(), Some((2, 50)));
        assert_eq!(heap.pop(), None);
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_priorities_pop_by_ascending_id() {
        let mut heap = IndexedMinHeap::with_universe(8);
        heap.insert(5, 7);
        heap.insert(1, 7);
        heap.insert(3, 7);
        assert_eq!(heap.pop(), Some((1, 7)));
        assert_eq!(heap.pop(), Some((3, 7)));
        assert_eq!(heap.pop(), Some((5, 7)));
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = IndexedMinHeap::with_universe(4);
        heap.insert(0, 10);
        heap.insert(1, 20);
        heap.insert(2, 30);
        heap.decrease_key(2, 5);
        assert_eq!(heap.pop(), Some((2, 5)));
        assert_eq!(heap.pop(), Some((0, 10)));
        heap.decrease_key(1, 20); // equal is allowed, a no-op reorder
        assert_eq!(heap.pop(), Some((1, 20)));
    }

    #[test]
    fn membership_follows_insert_and_pop() {
        let mut heap = IndexedMinHeap::with_universe(3);
        assert!(!heap.contains(1));
        heap.insert(1, 4);
        assert!(heap.contains(1));
        heap.pop();
        assert!(!heap.contains(1));
        // A popped id can be queued again with a fresh priority.
        heap.insert(1, 9);
        assert_eq!(heap.pop(), Some((1, 9)));
    }

    #[test]
    #[should_panic(expected = "already queued")]
    fn duplicate_insert_panics() {
        let mut heap = IndexedMinHeap::with_universe(2);
        heap.insert(0, 1);
        heap.insert(0, 2);
    }

    #[test]
    #[should_panic(expected = "not queued")]
    fn decrease_key_on_absent_id_panics() {
        let mut heap = IndexedMinHeap::with_universe(2);
        heap.decrease_key(0, 1);
    }

    #[test]
    #[should_panic(expected = "raised priority")]
    fn decrease_key_cannot_raise() {
        let mut heap = IndexedMinHeap::with_universe(2);
        heap.insert(0, 5);
        heap.decrease_key(0, 6);
    }

    // Drive random insert/decrease_key/pop sequences against a naive scan
    // model that recomputes the minimum in O(n) each time.
    #[test]
    fn fuzz_against_scan_model() {
        const UNIVERSE: usize = 48;
        for seed in 0..8u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut heap = IndexedMinHeap::with_universe(UNIVERSE);
            let mut model: HashMap<usize, u64> = HashMap::new();

            for _ in 0..2000 {
                match rng.gen_range(0..3) {
                    0 => {
                        let id = rng.gen_range(0..UNIVERSE);
                        if !model.contains_key(&id) {
                            let p = rng.gen_range(0..1000u64);
                            heap.insert(id, p);
                            model.insert(id, p);
                        }
                    }
                    1 => {
                        let id = rng.gen_range(0..UNIVERSE);
                        if let Some(p) = model.get_mut(&id) {
                            let lowered = p.saturating_sub(rng.gen_range(0..50u64));
                            heap.decrease_key(id, lowered);
                            *p = lowered;
                        }
                    }
                    _ => {
                        let expected = model.iter().map(|(&id, &p)| (p, id)).min();
                        match heap.pop() {
                            Some((id, p)) => {
                                assert_eq!(Some((p, id)), expected, "seed {}", seed);
                                model.remove(&id);
                            }
                            None => assert!(expected.is_none(), "seed {}", seed),
                        }
                    }
                }
                assert_eq!(heap.len(), model.len());
            }

            // Drain what is left; pops must come out sorted and complete.
            let mut last = None;
            while let Some((id, p)) = heap.pop() {
                assert_eq!(model.remove(&id), Some(p));
                if let Some(prev) = last {
                    assert!(prev <= (p, id));
                }
                last = Some((p, id));
            }
            assert!(model.is_empty());
        }
    }
}
