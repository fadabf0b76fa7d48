use crate::error::GraphError;
use crate::graph::*;
use crate::heap::{FibonacciHeap, KeyedMinQueue};
use ahash::RandomState;
use std::collections::HashSet;

const MST_NEEDS_UNDIRECTED: &str = "minimum spanning tree requires an undirected graph";

impl<T, W> Graph<T, W>
where
    T: Ord + Clone,
    W: Ord + Clone,
{
    /// Minimum spanning tree by Kruskal's algorithm.
    ///
    /// Materializes a brand-new undirected graph holding the chosen edges;
    /// the source graph is left untouched.
    /// Every undirected edge enters a min-queue exactly once; the cheapest
    /// edge is repeatedly taken unless a path already connects its endpoints
    /// in the result (a reachability scan — cycle rejection is silent control
    /// flow, not an error).
    /// Stops at V−1 result edges or queue exhaustion.
    ///
    /// On a disconnected source the result is a spanning forest of the
    /// edge-covered components; vertices without any edge never appear.
    /// Fails with [GraphError::InvalidOperation] on a directed graph.
    pub fn mst_kruskal(&self) -> Result<Graph<T, W>, GraphError> {
        self.mst_kruskal_with::<FibonacciHeap<Edge, W>>()
    }

    /// [Graph::mst_kruskal] with an explicit priority-queue backing.
    pub fn mst_kruskal_with<Q>(&self) -> Result<Graph<T, W>, GraphError>
    where
        Q: KeyedMinQueue<Edge, W>,
    {
        if self.is_directed() {
            return Err(GraphError::InvalidOperation(MST_NEEDS_UNDIRECTED));
        }
        let mut queue = Q::new();
        self.fill_edge_queue(&mut queue);
        let mut mst = Graph::undirected();
        let target = self.vertex_size().saturating_sub(1);
        while mst.edge_size() < target {
            let Some((e, w)) = queue.pop() else {
                break;
            };
            if self.would_cycle(&mst, e.source, e.sink) {
                continue;
            }
            log::debug!("kruskal: taking {:?}", e);
            self.adopt_edge(&mut mst, e, w);
        }
        Ok(mst)
    }

    /// Minimum spanning tree by Prim's algorithm.
    ///
    /// Grows a tree from the minimum-tag vertex, keeping a frontier queue of
    /// edges leading from the grown tree to unvisited vertices; repeatedly
    /// takes the cheapest frontier edge whose far endpoint is unvisited.
    /// Terminates like Kruskal; spans all vertices only when the graph is
    /// connected from the start vertex, otherwise the result is a partial
    /// tree of the start component.
    /// Fails with [GraphError::InvalidOperation] on a directed graph.
    pub fn mst_prim(&self) -> Result<Graph<T, W>, GraphError> {
        self.mst_prim_with::<FibonacciHeap<Edge, W>>()
    }

    /// [Graph::mst_prim] with an explicit priority-queue backing.
    pub fn mst_prim_with<Q>(&self) -> Result<Graph<T, W>, GraphError>
    where
        Q: KeyedMinQueue<Edge, W>,
    {
        if self.is_directed() {
            return Err(GraphError::InvalidOperation(MST_NEEDS_UNDIRECTED));
        }
        let mut mst = Graph::undirected();
        let Some(start) = self.min_vertex() else {
            return Ok(mst);
        };
        let mut visited: HashSet<VertexId, RandomState> = HashSet::with_hasher(RandomState::new());
        visited.insert(start);
        mst.add_vertex(self.tag(start).unwrap().clone());
        let mut frontier = Q::new();
        for (dst, w) in self.out_edges(start) {
            if dst != start {
                frontier.push(Edge::new(start, dst), w.clone());
            }
        }
        let target = self.vertex_size().saturating_sub(1);
        while mst.edge_size() < target {
            let Some((e, w)) = frontier.pop() else {
                break;
            };
            if visited.contains(&e.sink) {
                continue;
            }
            // the frontier discipline already excludes cycles; keep the same
            // reachability guard as Kruskal anyway
            if self.would_cycle(&mst, e.source, e.sink) {
                continue;
            }
            log::debug!("prim: taking {:?}", e);
            self.adopt_edge(&mut mst, e, w);
            visited.insert(e.sink);
            for (dst, w2) in self.out_edges(e.sink) {
                if !visited.contains(&dst) {
                    frontier.push(Edge::new(e.sink, dst), w2.clone());
                }
            }
        }
        Ok(mst)
    }

    /// Queues every undirected edge exactly once: edges toward
    /// already-expanded vertices were queued when that vertex was expanded.
    fn fill_edge_queue<Q>(&self, queue: &mut Q)
    where
        Q: KeyedMinQueue<Edge, W>,
    {
        let mut expanded: HashSet<VertexId, RandomState> = HashSet::with_hasher(RandomState::new());
        for (v, _) in self.iter_vertices() {
            for (dst, w) in self.out_edges(v) {
                if expanded.contains(&dst) {
                    continue;
                }
                queue.push(Edge::new(v, dst), w.clone());
            }
            expanded.insert(v);
        }
    }

    /// Whether adding the edge would close a cycle in the result built so
    /// far.
    /// A self-loop always does.
    fn would_cycle(&self, mst: &Graph<T, W>, a: VertexId, b: VertexId) -> bool {
        if a == b {
            return true;
        }
        let ta = self.tag(a).unwrap();
        let tb = self.tag(b).unwrap();
        match (mst.vertex_id(ta), mst.vertex_id(tb)) {
            (Some(u), Some(v)) => mst.has_path(u, v),
            _ => false,
        }
    }

    /// Copies an edge of `self` into the result graph, creating the endpoint
    /// vertices as needed.
    fn adopt_edge(&self, mst: &mut Graph<T, W>, e: Edge, w: W) {
        let ta = self.tag(e.source).unwrap().clone();
        let tb = self.tag(e.sink).unwrap().clone();
        let (u, _) = mst.add_vertex(ta);
        let (v, _) = mst.add_vertex(tb);
        mst.add_edge(u, v, w).unwrap();
    }
}
