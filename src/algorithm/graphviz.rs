//! Visualize graphs in the graphviz format.
use crate::graph::*;
use ahash::RandomState;
use std::collections::HashMap;

impl<T, W> Graph<T, W>
where
    T: Ord,
{
    /**
     * Dumps the graph to a `std::io::Write` object in the graphviz format.
     *
     * `vertex_label` turns a tag into a graphviz node name and an optional
     * attribute list; `edge_label` turns a weight into an optional attribute
     * list.
     * Vertices and edges come out in tag order, so the dump is
     * deterministic.
     *
     * # Examples
     *
     * ```rust
     * use keygraph::graph::Graph;
     *
     * let mut g = Graph::<u32, u32>::directed();
     * g.add_vertex(0);
     * g.add_vertex(1);
     * g.add_edge_by_tag(&0, &1, 7).unwrap();
     * g.add_edge_by_tag(&0, &0, 1).unwrap();
     * let trial = {
     *     let mut buf = vec![];
     *     g.dump_in_graphviz(
     *         &mut buf,
     *         "trial",
     *         |tag| (format!("{}", tag), None),
     *         |weight| Some(format!("label={}", weight)),
     *     )
     *     .unwrap();
     *     String::from_utf8(buf).unwrap()
     * };
     * assert_eq!(
     *     trial,
     *     r#"digraph trial {
     *   0 ;
     *   1 ;
     *   0 -> 0 [label=1] ;
     *   0 -> 1 [label=7] ;
     * }
     * "#
     * );
     * ```
     */
    pub fn dump_in_graphviz<Out>(
        &self,
        out: &mut Out,
        graph_name: &str,
        vertex_label: fn(&T) -> (String, Option<String>),
        edge_label: fn(&W) -> Option<String>,
    ) -> std::io::Result<()>
    where
        Out: std::io::Write,
    {
        if self.is_directed() {
            writeln!(out, "digraph {} {{", graph_name)?;
        } else {
            writeln!(out, "graph {} {{", graph_name)?;
        }
        let mut names = HashMap::with_hasher(RandomState::new());
        for (vid, tag) in self.iter_vertices() {
            let (name, label) = vertex_label(tag);
            if let Some(label) = label {
                writeln!(out, "  {} [{}] ;", name, label)?;
            } else {
                writeln!(out, "  {} ;", name)?;
            }
            names.insert(vid, name);
        }
        let dir = if self.is_directed() { "->" } else { "--" };
        for (e, w) in self.iter_edges() {
            let src = names.get(&e.source).unwrap();
            let snk = names.get(&e.sink).unwrap();
            if let Some(label) = edge_label(w) {
                writeln!(out, "  {} {} {} [{}] ;", src, dir, snk, label)?;
            } else {
                writeln!(out, "  {} {} {} ;", src, dir, snk)?;
            }
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}
