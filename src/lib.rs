//! An in-memory graph engine keyed by user-supplied tags.
//!
//! # The store
//!
//! Some graph libraries hand out references into their internals, which makes
//! removal fragile.
//! Here vertices are addressed through stable [graph::VertexId] handles,
//! essentially `usize`.
//! Algorithms may feel free to copy and store them; a handle stays valid
//! exactly until its vertex is removed, and handles are never reused.
//!
//! Every vertex is identified by a tag of any totally-ordered type, and every
//! edge carries a weight.
//! The vertex set is ordered by tag, and so are the edge sets of each vertex
//! (by destination tag), which makes traversal deterministic.
//! A [graph::Graph] is directed or undirected, fixed at construction; in
//! undirected mode edge mutations apply to both orientations as one logical
//! operation.
//!
//! # The algorithms
//!
//! BFS/DFS visiting, reachability, single-source shortest paths (Dijkstra)
//! and minimum spanning trees (Kruskal and Prim) live in [algorithm].
//! Dijkstra and the MST builders drive their frontiers through the
//! [heap::KeyedMinQueue] contract, backed by a Fibonacci heap by default and
//! swappable for a binary heap without changing any result.
//!
//! ```rust
//! use keygraph::graph::Graph;
//!
//! let mut g = Graph::<char, u32>::undirected();
//! for tag in ['a', 'b', 'c'] {
//!     g.add_vertex(tag);
//! }
//! g.add_edge_by_tag(&'a', &'b', 1).unwrap();
//! g.add_edge_by_tag(&'b', &'c', 2).unwrap();
//! g.add_edge_by_tag(&'a', &'c', 9).unwrap();
//!
//! let dist = g.dijkstra_from(&'a').unwrap();
//! assert_eq!(dist[&'b'], 1);
//! assert_eq!(dist[&'c'], 3);
//!
//! let mst = g.mst_kruskal().unwrap();
//! assert_eq!(mst.edge_size(), 2);
//! ```

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod heap;
