use crate::error::GraphError;
use crate::graph::*;
use bimap::BiBTreeMap;
use std::collections::{BTreeMap, BTreeSet};

/// A tag-keyed graph with balanced computational complexity.
///
/// Vertices are identified by user-supplied tags of any totally-ordered type;
/// edges are identified by their endpoint handles and carry a weight.
/// Per-vertex edge sets are unique by destination, i.e., no parallel edges.
/// The directed/undirected [Mode] is fixed at construction; in undirected mode
/// every edge mutation applies to both orientations as one logical operation.
///
/// | operation         | complexity                                       |
/// | ----------------- | ------------------------------------------------ |
/// | `add_vertex`      | O(log \|V\|)                                     |
/// | `add_edge`        | O(log \|V\| + log \|E\|)                         |
/// | `remove_edge`     | O(log \|E\|)                                     |
/// | `remove_vertex`   | O(log \|V\| + \|E'\| log \|E\|), where E' is the |
/// |                   | set of edges incident to the removed vertex      |
/// | `weight`          | O(log \|E\|)                                     |
/// | `vertex_size`     | O(1)                                             |
/// | `edge_size`       | O(1)                                             |
/// | `iter_vertices`   | amortized O(1) per item, in tag order            |
/// | `out_edges`       | O(d log \|V\|) to sort d edges into tag order    |
pub struct Graph<T, W> {
    mode: Mode,
    vid_factory: VertexIdFactory,
    tags: BiBTreeMap<T, VertexId>,
    // out-adjacency keyed (source, sink); undirected edges are materialized in
    // both orientations, self-loops once
    weights: BTreeMap<(VertexId, VertexId), W>,
    // reverse index keyed (sink, source), for stripping edges that target a
    // vertex under removal
    targets: BTreeSet<(VertexId, VertexId)>,
    vertex_count: usize,
    edge_count: usize,
}

impl<T, W> Clone for Graph<T, W>
where
    T: Ord + Clone,
    W: Clone,
{
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            vid_factory: self.vid_factory.clone(),
            tags: self.tags.clone(),
            weights: self.weights.clone(),
            targets: self.targets.clone(),
            vertex_count: self.vertex_count,
            edge_count: self.edge_count,
        }
    }
}

impl<T, W> Graph<T, W>
where
    T: Ord,
{
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            vid_factory: VertexIdFactory::new(),
            tags: BiBTreeMap::new(),
            weights: BTreeMap::new(),
            targets: BTreeSet::new(),
            vertex_count: 0,
            edge_count: 0,
        }
    }

    pub fn directed() -> Self {
        Self::new(Mode::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(Mode::Undirected)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode == Mode::Directed
    }

    /// Size counted in vertices.
    pub fn vertex_size(&self) -> usize {
        self.vertex_count
    }

    /// Size counted in logical edges (an undirected edge counts once).
    pub fn edge_size(&self) -> usize {
        self.edge_count
    }

    /// Adds a vertex if its tag is not taken yet.
    ///
    /// Returns the handle and whether the vertex was actually inserted.
    /// An existing tag keeps its handle and the second component is `false`.
    pub fn add_vertex(&mut self, tag: T) -> (VertexId, bool) {
        if let Some(vid) = self.tags.get_by_left(&tag) {
            return (*vid, false);
        }
        let vid = self.vid_factory.one_more();
        self.tags.insert(tag, vid);
        self.vertex_count += 1;
        (vid, true)
    }

    /// Removes a vertex and every edge referencing it.
    ///
    /// Outgoing edges, mirrored back-edges and edges from unrelated vertices
    /// that target the vertex are all stripped before the vertex itself goes.
    /// Returns `false` if the handle does not resolve.
    pub fn remove_vertex(&mut self, v: VertexId) -> bool {
        if !self.tags.contains_right(&v) {
            return false;
        }
        let outs: Vec<VertexId> = self
            .weights
            .range((v, VertexId::MIN)..=(v, VertexId::MAX))
            .map(|(&(_, dst), _)| dst)
            .collect();
        for dst in outs {
            self.remove_edge(v, dst);
        }
        let ins: Vec<VertexId> = self
            .targets
            .range((v, VertexId::MIN)..=(v, VertexId::MAX))
            .map(|&(_, src)| src)
            .collect();
        for src in ins {
            self.remove_edge(src, v);
        }
        self.tags.remove_by_right(&v);
        self.vertex_count -= 1;
        true
    }

    pub fn remove_vertex_by_tag(&mut self, tag: &T) -> bool {
        match self.vertex_id(tag) {
            Some(v) => self.remove_vertex(v),
            None => false,
        }
    }

    /// Gets a vertex handle by tag.
    pub fn vertex_id(&self, tag: &T) -> Option<VertexId> {
        self.tags.get_by_left(tag).copied()
    }

    /// Gets a vertex tag by handle.
    pub fn tag(&self, v: VertexId) -> Option<&T> {
        self.tags.get_by_right(&v)
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.tags.contains_right(&v)
    }

    pub fn contains_vertex_by_tag(&self, tag: &T) -> bool {
        self.tags.contains_left(tag)
    }

    /// The handle of the minimum-tag vertex, the default traversal start.
    pub fn min_vertex(&self) -> Option<VertexId> {
        self.tags.iter().next().map(|(_, vid)| *vid)
    }

    /// Iteration over all vertices in tag order.
    pub fn iter_vertices(&self) -> impl Iterator<Item = (VertexId, &T)> + '_ {
        self.tags.iter().map(|(tag, vid)| (*vid, tag))
    }

    /// Iteration over the edges going out of `v`, in destination-tag order.
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = (VertexId, &W)> + '_ {
        let mut res: Vec<(&T, VertexId, &W)> = self
            .weights
            .range((v, VertexId::MIN)..=(v, VertexId::MAX))
            .map(|(&(_, dst), w)| (self.tags.get_by_right(&dst).unwrap(), dst, w))
            .collect();
        res.sort_unstable_by(|a, b| a.0.cmp(b.0));
        res.into_iter().map(|(_, dst, w)| (dst, w))
    }

    /// Number of edges going out of `v`.
    pub fn out_degree(&self, v: VertexId) -> usize {
        self.weights
            .range((v, VertexId::MIN)..=(v, VertexId::MAX))
            .count()
    }

    /// Iteration over all logical edges in tag order.
    ///
    /// In undirected mode each edge shows up once, oriented from its
    /// lower-tag endpoint.
    pub fn iter_edges(&self) -> impl Iterator<Item = (Edge, &W)> + '_ {
        let mut res = vec![];
        for (src, src_tag) in self.iter_vertices() {
            for (dst, w) in self.out_edges(src) {
                if self.mode == Mode::Undirected {
                    let dst_tag = self.tags.get_by_right(&dst).unwrap();
                    if dst_tag < src_tag {
                        continue;
                    }
                }
                res.push((Edge::new(src, dst), w));
            }
        }
        res.into_iter()
    }

    pub fn contains_edge(&self, source: VertexId, sink: VertexId) -> bool {
        self.weights.contains_key(&(source, sink))
    }

    /// Gets the weight of the edge from `source` to `sink`.
    ///
    /// Fails with [GraphError::NotFound] if there is no such edge.
    /// In undirected mode both orientations are materialized with the same
    /// weight, so a single probe answers the query regardless of which
    /// endpoint's adjacency set is smaller.
    pub fn weight(&self, source: VertexId, sink: VertexId) -> Result<&W, GraphError> {
        self.weights.get(&(source, sink)).ok_or(GraphError::NotFound)
    }

    pub fn weight_by_tag(&self, a: &T, b: &T) -> Result<&W, GraphError> {
        let u = self.vertex_id(a).ok_or(GraphError::NotFound)?;
        let v = self.vertex_id(b).ok_or(GraphError::NotFound)?;
        self.weight(u, v)
    }

    /// Removes the edge from `source` to `sink`, and its mirror in
    /// undirected mode.
    pub fn remove_edge(&mut self, source: VertexId, sink: VertexId) -> bool {
        if self.weights.remove(&(source, sink)).is_none() {
            return false;
        }
        self.targets.remove(&(sink, source));
        if self.mode == Mode::Undirected && source != sink {
            self.weights.remove(&(sink, source));
            self.targets.remove(&(source, sink));
        }
        self.edge_count -= 1;
        true
    }

    pub fn remove_edge_by_tag(&mut self, a: &T, b: &T) -> bool {
        match (self.vertex_id(a), self.vertex_id(b)) {
            (Some(u), Some(v)) => self.remove_edge(u, v),
            _ => false,
        }
    }
}

impl<T, W> Graph<T, W>
where
    T: Ord,
    W: Clone,
{
    /// Adds an edge if the destination is not linked yet.
    ///
    /// Fails with [GraphError::NotFound] if either handle does not resolve.
    /// Returns the edge handle and whether the edge was actually inserted;
    /// an existing edge keeps its weight and the second component is `false`.
    /// In undirected mode the mirrored orientation is inserted as part of the
    /// same logical operation.
    pub fn add_edge(
        &mut self,
        source: VertexId,
        sink: VertexId,
        weight: W,
    ) -> Result<(Edge, bool), GraphError> {
        if !self.tags.contains_right(&source) || !self.tags.contains_right(&sink) {
            return Err(GraphError::NotFound);
        }
        let edge = Edge::new(source, sink);
        if self.weights.contains_key(&(source, sink)) {
            return Ok((edge, false));
        }
        if self.mode == Mode::Undirected && source != sink {
            self.weights.insert((sink, source), weight.clone());
            self.targets.insert((source, sink));
        }
        self.weights.insert((source, sink), weight);
        self.targets.insert((sink, source));
        self.edge_count += 1;
        Ok((edge, true))
    }

    pub fn add_edge_by_tag(&mut self, a: &T, b: &T, weight: W) -> Result<(Edge, bool), GraphError> {
        let u = self.vertex_id(a).ok_or(GraphError::NotFound)?;
        let v = self.vertex_id(b).ok_or(GraphError::NotFound)?;
        self.add_edge(u, v, weight)
    }

    /// Overwrites the weight of an existing edge.
    ///
    /// Fails with [GraphError::NotFound] if there is no such edge.
    pub fn set_weight(
        &mut self,
        source: VertexId,
        sink: VertexId,
        weight: W,
    ) -> Result<(), GraphError> {
        if !self.weights.contains_key(&(source, sink)) {
            return Err(GraphError::NotFound);
        }
        if self.mode == Mode::Undirected && source != sink {
            self.weights.insert((sink, source), weight.clone());
        }
        self.weights.insert((source, sink), weight);
        Ok(())
    }

    pub fn set_weight_by_tag(&mut self, a: &T, b: &T, weight: W) -> Result<(), GraphError> {
        let u = self.vertex_id(a).ok_or(GraphError::NotFound)?;
        let v = self.vertex_id(b).ok_or(GraphError::NotFound)?;
        self.set_weight(u, v, weight)
    }
}

impl<T, W> std::fmt::Debug for Graph<T, W>
where
    T: Ord + std::fmt::Debug,
    W: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph<{:?}> {{", self.mode)?;
        for (v, tag) in self.iter_vertices() {
            writeln!(f, "[{:?}]:", tag)?;
            for (dst, w) in self.out_edges(v) {
                writeln!(f, "  --{:?}-> [{:?}]", w, self.tag(dst).unwrap())?;
            }
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}

impl<T, W> PartialEq for Graph<T, W>
where
    T: Ord,
    W: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.mode != other.mode
            || self.vertex_size() != other.vertex_size()
            || self.edge_size() != other.edge_size()
        {
            return false;
        }
        if !self
            .iter_vertices()
            .map(|(_, t)| t)
            .eq(other.iter_vertices().map(|(_, t)| t))
        {
            return false;
        }
        let mine = self
            .iter_edges()
            .map(|(e, w)| (self.tag(e.source).unwrap(), self.tag(e.sink).unwrap(), w));
        let theirs = other
            .iter_edges()
            .map(|(e, w)| (other.tag(e.source).unwrap(), other.tag(e.sink).unwrap(), w));
        mine.eq(theirs)
    }
}

impl<T, W> Eq for Graph<T, W>
where
    T: Ord,
    W: Eq,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn add_vertex_is_idempotent_per_tag() {
        let mut g = Graph::<&str, u32>::directed();
        let (v0, inserted) = g.add_vertex("a");
        assert!(inserted);
        let (v1, inserted) = g.add_vertex("a");
        assert!(!inserted);
        assert_eq!(v0, v1);
        assert_eq!(g.vertex_size(), 1);
    }

    #[test]
    fn add_edge_requires_both_endpoints() {
        let mut g = Graph::<u32, u32>::directed();
        let (v, _) = g.add_vertex(1);
        let stale = VertexId::new(42);
        assert_eq!(g.add_edge(v, stale, 7), Err(GraphError::NotFound));
        assert_eq!(g.add_edge(stale, v, 7), Err(GraphError::NotFound));
        assert_eq!(g.edge_size(), 0);
    }

    #[test]
    fn add_edge_keeps_existing_weight() {
        let mut g = Graph::<u32, u32>::directed();
        let (u, _) = g.add_vertex(1);
        let (v, _) = g.add_vertex(2);
        assert!(g.add_edge(u, v, 7).unwrap().1);
        assert!(!g.add_edge(u, v, 9).unwrap().1);
        assert_eq!(g.weight(u, v), Ok(&7));
        assert_eq!(g.edge_size(), 1);
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g = Graph::<char, u32>::undirected();
        let (u, _) = g.add_vertex('u');
        let (v, _) = g.add_vertex('v');
        g.add_edge(u, v, 3).unwrap();
        assert_eq!(g.weight(u, v), Ok(&3));
        assert_eq!(g.weight(v, u), Ok(&3));
        assert_eq!(g.edge_size(), 1);

        g.set_weight(v, u, 5).unwrap();
        assert_eq!(g.weight(u, v), Ok(&5));
        assert_eq!(g.weight(v, u), Ok(&5));

        assert!(g.remove_edge(v, u));
        assert_eq!(g.weight(u, v), Err(GraphError::NotFound));
        assert_eq!(g.weight(v, u), Err(GraphError::NotFound));
        assert_eq!(g.edge_size(), 0);
    }

    #[test]
    fn remove_vertex_strips_all_incident_edges() {
        let mut g = Graph::<char, u32>::directed();
        let (a, _) = g.add_vertex('a');
        let (b, _) = g.add_vertex('b');
        let (c, _) = g.add_vertex('c');
        g.add_edge(a, b, 1).unwrap();
        g.add_edge(b, c, 2).unwrap();
        g.add_edge(c, b, 3).unwrap();
        g.add_edge(b, b, 4).unwrap();
        assert_eq!(g.edge_size(), 4);

        assert!(g.remove_vertex(b));
        assert_eq!(g.vertex_size(), 2);
        assert_eq!(g.edge_size(), 0);
        assert!(!g.contains_vertex(b));
        assert_eq!(g.out_degree(a), 0);
        assert_eq!(g.out_degree(c), 0);
    }

    #[test]
    fn readding_a_removed_tag_starts_with_an_empty_edge_set() {
        let mut g = Graph::<char, u32>::undirected();
        g.add_vertex('x');
        g.add_vertex('y');
        g.add_edge_by_tag(&'x', &'y', 9).unwrap();

        let old = g.vertex_id(&'x').unwrap();
        assert!(g.remove_vertex_by_tag(&'x'));
        let (new, inserted) = g.add_vertex('x');
        assert!(inserted);
        assert_ne!(old, new);
        assert!(!g.contains_vertex(old));
        assert_eq!(g.out_edges(new).count(), 0);
        assert_eq!(g.edge_size(), 0);
    }

    #[test]
    fn iteration_follows_tag_order() {
        let mut g = Graph::<char, u32>::directed();
        for c in ['d', 'b', 'a', 'c'] {
            g.add_vertex(c);
        }
        let tags: Vec<char> = g.iter_vertices().map(|(_, t)| *t).collect();
        assert_eq!(tags, vec!['a', 'b', 'c', 'd']);

        let (a, _) = g.add_vertex('a');
        for c in ['d', 'c', 'b'] {
            g.add_edge_by_tag(&'a', &c, 1).unwrap();
        }
        let order: Vec<char> = g.out_edges(a).map(|(dst, _)| *g.tag(dst).unwrap()).collect();
        assert_eq!(order, vec!['b', 'c', 'd']);
    }

    #[test]
    fn undirected_iter_edges_lists_each_edge_once() {
        let mut g = Graph::<char, u32>::undirected();
        for c in ['a', 'b', 'c'] {
            g.add_vertex(c);
        }
        g.add_edge_by_tag(&'a', &'b', 1).unwrap();
        g.add_edge_by_tag(&'c', &'b', 2).unwrap();
        g.add_edge_by_tag(&'c', &'c', 3).unwrap();
        let listed: Vec<(char, char, u32)> = g
            .iter_edges()
            .map(|(e, w)| (*g.tag(e.source).unwrap(), *g.tag(e.sink).unwrap(), *w))
            .collect();
        assert_eq!(listed, vec![('a', 'b', 1), ('b', 'c', 2), ('c', 'c', 3)]);
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        AddVertex(u8),
        RemoveVertex(u8),
        AddEdge(u8, u8, u8),
        RemoveEdge(u8, u8),
    }

    #[derive(Debug, Clone)]
    struct Ops(Vec<Op>);

    impl quickcheck::Arbitrary for Ops {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            let len = usize::arbitrary(g) % 48;
            let ops = (0..len)
                .map(|_| match u8::arbitrary(g) % 4 {
                    0 => Op::AddVertex(u8::arbitrary(g) % 6),
                    1 => Op::RemoveVertex(u8::arbitrary(g) % 6),
                    2 => Op::AddEdge(
                        u8::arbitrary(g) % 6,
                        u8::arbitrary(g) % 6,
                        u8::arbitrary(g) % 16 + 1,
                    ),
                    _ => Op::RemoveEdge(u8::arbitrary(g) % 6, u8::arbitrary(g) % 6),
                })
                .collect();
            Self(ops)
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let me = self.clone();
            let it = (0..me.0.len()).rev().map(move |n| Ops(me.0[0..n].to_vec()));
            Box::new(it)
        }
    }

    fn apply(g: &mut Graph<u8, u8>, ops: &Ops) {
        for op in ops.0.iter() {
            match *op {
                Op::AddVertex(t) => {
                    g.add_vertex(t);
                }
                Op::RemoveVertex(t) => {
                    g.remove_vertex_by_tag(&t);
                }
                Op::AddEdge(a, b, w) => {
                    let known = g.contains_vertex_by_tag(&a) && g.contains_vertex_by_tag(&b);
                    let res = g.add_edge_by_tag(&a, &b, w);
                    assert_eq!(res.is_ok(), known);
                }
                Op::RemoveEdge(a, b) => {
                    g.remove_edge_by_tag(&a, &b);
                }
            }
        }
    }

    fn check_invariants(g: &Graph<u8, u8>) {
        assert_eq!(g.vertex_size(), g.iter_vertices().count());
        assert_eq!(g.edge_size(), g.iter_edges().count());
        for (e, w) in g.iter_edges() {
            assert!(g.contains_vertex(e.source));
            assert!(g.contains_vertex(e.sink));
            if !g.is_directed() {
                assert_eq!(g.weight(e.sink, e.source), Ok(w));
            }
        }
    }

    #[quickcheck]
    fn counts_and_symmetry_survive_arbitrary_mutation(ops: Ops) {
        for mode in [Mode::Directed, Mode::Undirected] {
            let mut g = Graph::<u8, u8>::new(mode);
            apply(&mut g, &ops);
            check_invariants(&g);
        }
    }
}
