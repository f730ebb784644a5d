//! GraphViz rendering, grounded on `src/petgraph/print.rs`: build a
//! `petgraph` graph mirroring an [`Arg`](crate::graph::Arg) and hand it to
//! `petgraph::dot::Dot` for the `.dot` text, or further to `graphviz-rust`
//! for a rendered `.svg` file behind the `svg` feature.

use std::fmt::Debug;

use petgraph::graph::DiGraph;

use crate::graph::Arg;

/// Converts `graph` into a `petgraph::graph::DiGraph` with the same node
/// ids (`petgraph` indices are assigned in insertion order, so node `i` of
/// `graph` becomes `NodeIndex(i)`), for rendering or for downstream
/// `petgraph` algorithms.
fn to_petgraph<N, E>(graph: &Arg<N, E>) -> DiGraph<N, E>
where
    N: Clone,
    E: Clone,
{
    let mut pg = DiGraph::with_capacity(graph.node_count() as usize, graph.edge_count() as usize);
    for v in 0..graph.node_count() {
        pg.add_node(graph.node_attr(v).clone());
    }
    for v in 0..graph.node_count() {
        for (&w, attr) in graph.out_neighbors(v).iter().zip(graph.out_edge_attrs(v)) {
            pg.add_edge(
                petgraph::graph::NodeIndex::new(v as usize),
                petgraph::graph::NodeIndex::new(w as usize),
                attr.clone(),
            );
        }
    }
    pg
}

/// Renders `graph` to GraphViz `.dot` text. Node and edge labels are the
/// `Debug` representation of their attributes.
pub fn to_dot<N, E>(graph: &Arg<N, E>) -> String
where
    N: Clone + Debug,
    E: Clone + Debug,
{
    let pg = to_petgraph(graph);
    format!("{:?}", petgraph::dot::Dot::new(&pg))
}

/// Renders `graph` to an `.svg` file at `path` using a locally installed
/// `dot` binary. Requires the `svg` feature.
#[cfg(feature = "svg")]
pub fn to_svg<N, E>(graph: &Arg<N, E>, path: &str) -> Result<String, std::io::Error>
where
    N: Clone + Debug,
    E: Clone + Debug,
{
    use graphviz_rust::cmd::{CommandArg, Format};

    graphviz_rust::exec_dot(
        to_dot(graph),
        vec![
            CommandArg::Format(Format::Svg),
            CommandArg::Output(path.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::edge_text::EdgeTextSource;

    #[test]
    fn dot_output_lists_every_node_and_edge() {
        let src = EdgeTextSource::parse("1 2\n2 3\n").unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        let dot = to_dot(&g);
        assert!(dot.starts_with("digraph"));
        assert_eq!(dot.matches("->").count(), 2);
    }
}
