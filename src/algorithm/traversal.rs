use crate::error::GraphError;
use crate::graph::*;
use ahash::RandomState;
use std::collections::{HashSet, VecDeque};
use std::ops::ControlFlow;

/// The exploration discipline of [Graph::visit].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOrder {
    BreadthFirst,
    DepthFirst,
}

impl<T, W> Graph<T, W>
where
    T: Ord,
{
    /// Visits every vertex reachable from the minimum-tag vertex.
    ///
    /// Each reachable vertex is visited exactly once, in deterministic order:
    /// among multiple unvisited neighbors, visitation follows destination-tag
    /// order.
    /// Visited state is local to the call, so repeated calls produce
    /// identical sequences.
    pub fn visit<F>(&self, order: VisitOrder, mut visitor: F)
    where
        F: FnMut(VertexId, &T),
    {
        if let Some(start) = self.min_vertex() {
            let _ = self.visit_from(start, order, |v, tag| {
                visitor(v, tag);
                ControlFlow::Continue(())
            });
        }
    }

    /// Like [Graph::visit], from an explicit start vertex, with early
    /// termination through the visitor's [ControlFlow].
    ///
    /// Fails with [GraphError::NotFound] if the start handle does not
    /// resolve.
    pub fn visit_from<F>(
        &self,
        start: VertexId,
        order: VisitOrder,
        mut visitor: F,
    ) -> Result<(), GraphError>
    where
        F: FnMut(VertexId, &T) -> ControlFlow<()>,
    {
        if !self.contains_vertex(start) {
            return Err(GraphError::NotFound);
        }
        let mut seen: HashSet<VertexId, RandomState> = HashSet::with_hasher(RandomState::new());
        let mut pending = VecDeque::new();
        seen.insert(start);
        pending.push_back(start);
        loop {
            let next = match order {
                VisitOrder::BreadthFirst => pending.pop_front(),
                VisitOrder::DepthFirst => pending.pop_back(),
            };
            let Some(v) = next else {
                break;
            };
            if visitor(v, self.tag(v).unwrap()).is_break() {
                return Ok(());
            }
            match order {
                VisitOrder::BreadthFirst => {
                    for (dst, _) in self.out_edges(v) {
                        if seen.insert(dst) {
                            pending.push_back(dst);
                        }
                    }
                }
                VisitOrder::DepthFirst => {
                    // pushed in reverse so the lowest tag pops first
                    let neighbors: Vec<VertexId> =
                        self.out_edges(v).map(|(dst, _)| dst).collect();
                    for dst in neighbors.into_iter().rev() {
                        if seen.insert(dst) {
                            pending.push_back(dst);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Tests whether `b` can be reached from `a`.
    ///
    /// True if a direct edge a→b exists, otherwise true iff a depth-first
    /// search from `a` reaches `b`.
    /// Fails with [GraphError::NotFound] if either tag is absent.
    pub fn existing_way(&self, a: &T, b: &T) -> Result<bool, GraphError> {
        let ia = self.vertex_id(a).ok_or(GraphError::NotFound)?;
        let ib = self.vertex_id(b).ok_or(GraphError::NotFound)?;
        if self.contains_edge(ia, ib) {
            return Ok(true);
        }
        Ok(self.has_path(ia, ib))
    }

    /// Reachability by handle, the cycle test of the MST builders.
    pub(crate) fn has_path(&self, from: VertexId, to: VertexId) -> bool {
        let mut found = false;
        let _ = self.visit_from(from, VisitOrder::DepthFirst, |v, _| {
            if v == to {
                found = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_vertex_graph() -> Graph<char, u32> {
        let mut g = Graph::undirected();
        for c in ['a', 'b', 'c', 'd', 'e', 'f'] {
            g.add_vertex(c);
        }
        for (a, b, w) in [
            ('a', 'b', 1),
            ('a', 'c', 4),
            ('a', 'd', 5),
            ('b', 'c', 1),
            ('b', 'd', 2),
            ('c', 'd', 1),
            ('c', 'e', 5),
            ('c', 'f', 2),
            ('d', 'e', 1),
            ('d', 'f', 7),
            ('e', 'f', 6),
        ] {
            g.add_edge_by_tag(&a, &b, w).unwrap();
        }
        g
    }

    fn sequence(g: &Graph<char, u32>, order: VisitOrder) -> Vec<char> {
        let mut seq = vec![];
        g.visit(order, |_, tag| seq.push(*tag));
        seq
    }

    #[test]
    fn bfs_follows_tag_order() {
        let g = six_vertex_graph();
        assert_eq!(
            sequence(&g, VisitOrder::BreadthFirst),
            vec!['a', 'b', 'c', 'd', 'e', 'f']
        );
    }

    #[test]
    fn dfs_follows_tag_order() {
        let g = six_vertex_graph();
        assert_eq!(
            sequence(&g, VisitOrder::DepthFirst),
            vec!['a', 'b', 'c', 'e', 'f', 'd']
        );
    }

    #[test]
    fn repeated_visits_are_idempotent() {
        let g = six_vertex_graph();
        let first = sequence(&g, VisitOrder::BreadthFirst);
        let second = sequence(&g, VisitOrder::BreadthFirst);
        assert_eq!(first, second);
    }

    #[test]
    fn only_the_reachable_component_is_explored() {
        let mut g = Graph::<char, u32>::directed();
        for c in ['a', 'b', 'x', 'y'] {
            g.add_vertex(c);
        }
        g.add_edge_by_tag(&'a', &'b', 1).unwrap();
        g.add_edge_by_tag(&'x', &'y', 1).unwrap();
        assert_eq!(sequence(&g, VisitOrder::BreadthFirst), vec!['a', 'b']);
    }

    #[test]
    fn visiting_an_empty_graph_does_nothing() {
        let g = Graph::<char, u32>::directed();
        let mut count = 0;
        g.visit(VisitOrder::BreadthFirst, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn visit_from_rejects_stale_handles() {
        let mut g = Graph::<char, u32>::directed();
        let (v, _) = g.add_vertex('a');
        g.remove_vertex(v);
        let res = g.visit_from(v, VisitOrder::BreadthFirst, |_, _| {
            ControlFlow::Continue(())
        });
        assert_eq!(res, Err(GraphError::NotFound));
    }

    #[test]
    fn early_termination_stops_the_walk() {
        let g = six_vertex_graph();
        let start = g.min_vertex().unwrap();
        let mut seen = vec![];
        g.visit_from(start, VisitOrder::BreadthFirst, |_, tag| {
            seen.push(*tag);
            if seen.len() == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(seen, vec!['a', 'b']);
    }

    #[test]
    fn existing_way_covers_direct_and_transitive_reach() {
        let mut g = Graph::<char, u32>::directed();
        for c in ['a', 'b', 'c', 'z'] {
            g.add_vertex(c);
        }
        g.add_edge_by_tag(&'a', &'b', 1).unwrap();
        g.add_edge_by_tag(&'b', &'c', 1).unwrap();
        assert_eq!(g.existing_way(&'a', &'b'), Ok(true));
        assert_eq!(g.existing_way(&'a', &'c'), Ok(true));
        assert_eq!(g.existing_way(&'c', &'a'), Ok(false));
        assert_eq!(g.existing_way(&'a', &'z'), Ok(false));
        assert_eq!(g.existing_way(&'a', &'w'), Err(GraphError::NotFound));
    }
}
