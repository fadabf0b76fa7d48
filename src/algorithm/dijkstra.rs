use crate::error::GraphError;
use crate::graph::*;
use crate::heap::{FibonacciHeap, KeyedMinQueue};
use ahash::RandomState;
use std::collections::{BTreeMap, HashSet};
use std::ops::Add;

impl<T, W> Graph<T, W>
where
    T: Ord + Clone,
    W: Ord + Clone + Add<Output = W>,
{
    /// Single-source shortest paths.
    ///
    /// Returns the distance from `source` to every vertex reachable via at
    /// least one hop.
    /// The source itself never appears as a key, and unreachable vertices
    /// never appear — exhaustion of the frontier is normal termination, which
    /// covers disconnected components.
    /// Given equal candidate distances the settling order follows the
    /// priority queue's structural order and is not guaranteed stable across
    /// queue backings; the distances themselves are.
    ///
    /// The weight contract (total order plus an additive combine) is the
    /// trait bound, so an unsuitable weight type is rejected at compile time.
    /// Fails with [GraphError::NotFound] if `source` is absent.
    pub fn dijkstra_from(&self, source: &T) -> Result<BTreeMap<T, W>, GraphError> {
        self.dijkstra_from_with::<FibonacciHeap<VertexId, W>>(source)
    }

    /// [Graph::dijkstra_from] with an explicit priority-queue backing.
    pub fn dijkstra_from_with<Q>(&self, source: &T) -> Result<BTreeMap<T, W>, GraphError>
    where
        Q: KeyedMinQueue<VertexId, W>,
    {
        let origin = self.vertex_id(source).ok_or(GraphError::NotFound)?;
        let mut settled: HashSet<VertexId, RandomState> = HashSet::with_hasher(RandomState::new());
        settled.insert(origin);
        let mut dist: BTreeMap<VertexId, W> = BTreeMap::new();
        let mut frontier = Q::new();
        for (dst, w) in self.out_edges(origin) {
            if dst == origin {
                continue;
            }
            dist.insert(dst, w.clone());
            frontier.push(dst, w.clone());
        }
        while let Some((v, d)) = frontier.pop() {
            if !settled.insert(v) {
                // stale entry, harmless: skip and retry
                continue;
            }
            log::trace!("dijkstra: settled {:?}", v);
            for (dst, w) in self.out_edges(v) {
                if settled.contains(&dst) {
                    continue;
                }
                let cand = d.clone() + w.clone();
                match dist.get(&dst) {
                    Some(cur) if *cur <= cand => {}
                    Some(_) => {
                        dist.insert(dst, cand.clone());
                        frontier.decrease(&dst, cand).unwrap();
                    }
                    None => {
                        dist.insert(dst, cand.clone());
                        frontier.push(dst, cand);
                    }
                }
            }
        }
        Ok(dist
            .into_iter()
            .map(|(v, d)| (self.tag(v).unwrap().clone(), d))
            .collect())
    }
}
