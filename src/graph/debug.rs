use crate::graph::*;

/// A default implementation of inspecting into a graph with customized indentation.
pub struct GraphDebug<'a, T, W> {
    graph: &'a Graph<T, W>,
    init_indent: usize,
    indent_step: usize,
}

impl<'a, T, W> GraphDebug<'a, T, W>
where
    T: Ord,
{
    pub fn new(graph: &'a Graph<T, W>) -> Self {
        Self {
            graph,
            init_indent: 0,
            indent_step: 2,
        }
    }

    pub fn indent(mut self, init: usize, step: usize) -> Self {
        self.init_indent = init;
        self.indent_step = step;
        self
    }

    fn display_indent(&self, f: &mut std::fmt::Formatter<'_>, level: usize) -> std::fmt::Result {
        let indention = self.init_indent + self.indent_step * level;
        for _ in 0..indention {
            write!(f, " ")?;
        }
        Ok(())
    }
}

impl<'a, T, W> std::fmt::Debug for GraphDebug<'a, T, W>
where
    T: Ord + std::fmt::Debug,
    W: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (v, tag) in self.graph.iter_vertices() {
            self.display_indent(f, 0)?;
            writeln!(f, "{:?}", tag)?;
            for (dst, w) in self.graph.out_edges(v) {
                self.display_indent(f, 1)?;
                writeln!(f, "--{:?}-> {:?}", w, self.graph.tag(dst).unwrap())?;
            }
        }
        Ok(())
    }
}

impl<T, W> Graph<T, W>
where
    T: Ord,
{
    pub fn debug(&self) -> GraphDebug<'_, T, W> {
        GraphDebug::new(self)
    }
}
