use super::KeyedMinQueue;
use crate::error::GraphError;
use ahash::RandomState;
use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Reverse;
use std::hash::Hash;

/// A keyed binary heap, the simpler substitute for [super::FibonacciHeap].
///
/// Thin min-adapter over `keyed_priority_queue` (a max-heap), flipping
/// priorities through `Reverse`.
/// Everything is O(log n); `merge` degrades to reinsertion.
pub struct BinaryQueue<K, P>
where
    K: Hash + Eq,
    P: Ord,
{
    inner: KeyedPriorityQueue<K, Reverse<P>, RandomState>,
}

impl<K, P> Default for BinaryQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        <Self as KeyedMinQueue<K, P>>::new()
    }
}

impl<K, P> KeyedMinQueue<K, P> for BinaryQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn new() -> Self {
        Self {
            inner: KeyedPriorityQueue::with_capacity_and_hasher(0, RandomState::new()),
        }
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn push(&mut self, key: K, priority: P) -> bool {
        if self.inner.get_priority(&key).is_some() {
            return false;
        }
        self.inner.push(key, Reverse(priority));
        true
    }

    fn peek(&self) -> Result<(&K, &P), GraphError> {
        self.inner
            .peek()
            .map(|(k, p)| (k, &p.0))
            .ok_or(GraphError::Empty)
    }

    fn pop(&mut self) -> Option<(K, P)> {
        self.inner.pop().map(|(k, Reverse(p))| (k, p))
    }

    fn decrease(&mut self, key: &K, priority: P) -> Result<(), GraphError> {
        match self.inner.get_priority(key) {
            None => Err(GraphError::NotFound),
            Some(Reverse(cur)) => {
                if priority < *cur {
                    let _ = self.inner.set_priority(key, Reverse(priority));
                }
                Ok(())
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<P> {
        self.inner.remove(key).map(|Reverse(p)| p)
    }

    fn merge(&mut self, mut other: Self) {
        while let Some((k, p)) = other.inner.pop() {
            debug_assert!(self.inner.get_priority(&k).is_none());
            self.inner.push(k, p);
        }
    }
}
