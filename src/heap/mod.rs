//! Keyed min-priority queues with decrease-key support.
//!
//! Dijkstra and the MST builders drive their frontiers through the
//! [KeyedMinQueue] contract, so the backing structure is swappable without
//! touching algorithm code: only the complexity changes, never the results.
//!
//! [FibonacciHeap] is the canonical backing, a forest of ranked trees with
//! consolidation on extraction and cascading cuts on key decrease.
//! [BinaryQueue] is the simpler substitute, an adapter over
//! `keyed_priority_queue`.

mod fibonacci;
pub use self::fibonacci::*;
mod binary;
pub use self::binary::*;

use crate::error::GraphError;

/// A min-priority queue of unique keys with adjustable priorities.
pub trait KeyedMinQueue<K, P> {
    fn new() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queues a key.
    ///
    /// Returns `false` and leaves the queue untouched if the key is already
    /// queued.
    fn push(&mut self, key: K, priority: P) -> bool;

    /// The entry with the least priority.
    ///
    /// Fails with [GraphError::Empty] on an empty queue.
    fn peek(&self) -> Result<(&K, &P), GraphError>;

    /// Extracts the entry with the least priority.
    ///
    /// Exhaustion is normal termination for the algorithms, hence `Option`.
    fn pop(&mut self) -> Option<(K, P)>;

    /// Lowers the priority of an already-queued key.
    ///
    /// A priority not less than the current one leaves the entry untouched.
    /// Fails with [GraphError::NotFound] if the key is not queued.
    fn decrease(&mut self, key: &K, priority: P) -> Result<(), GraphError>;

    /// Deletes an arbitrary queued key, returning its priority.
    fn remove(&mut self, key: &K) -> Option<P>;

    /// Moves every entry of `other` into `self`.
    ///
    /// The key sets must be disjoint.
    fn merge(&mut self, other: Self);
}
