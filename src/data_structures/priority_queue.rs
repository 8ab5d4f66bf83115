use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-priority queue of `(item, priority)` pairs with lazy deletion left to
/// the caller: pushing an item twice keeps both entries.
#[derive(Debug, Clone)]
pub struct MinHeap<V, P>
where
    V: Ord,
    P: Ord,
{
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> MinHeap<V, P>
where
    V: Ord,
    P: Ord,
{
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, item: V, priority: P) {
        self.heap.push(Reverse((priority, item)));
    }

    /// Removes the entry with the lowest priority; ties go to the smaller item
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, item))| (item, priority))
    }
}

impl<V: Ord, P: Ord> Default for MinHeap<V, P> {
    fn default() -> Self {
        MinHeap::with_capacity(0)
    }
}
