//! Shared test fixtures: an `ArgSource` built directly from node/edge
//! literals, skipping the text-format loaders so the matching pipeline
//! itself is what's under test.

use argiso::graph::{Arg, ArgSource};

pub struct EdgeList<N, E> {
    pub nodes: Vec<N>,
    pub edges: Vec<(u32, u32, E)>,
}

impl<N: Clone, E: Clone> ArgSource<N, E> for EdgeList<N, E> {
    fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    fn node_attr(&self, node: u32) -> N {
        self.nodes[node as usize].clone()
    }

    fn out_edge_count(&self, node: u32) -> u32 {
        self.edges.iter().filter(|(from, _, _)| *from == node).count() as u32
    }

    fn out_edge(&self, node: u32, i: u32) -> (u32, E) {
        let (_, to, attr) = self
            .edges
            .iter()
            .filter(|(from, _, _)| *from == node)
            .nth(i as usize)
            .expect("index in range for out_edge_count");
        (*to, attr.clone())
    }
}

pub fn build<N, E>(nodes: Vec<N>, edges: Vec<(u32, u32, E)>) -> Arg<N, E>
where
    N: Clone + Eq + std::hash::Hash,
    E: Clone + Eq + std::hash::Hash,
{
    Arg::from_source(&EdgeList { nodes, edges }).expect("well-formed fixture graph")
}
