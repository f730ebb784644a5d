//! JSON (de)serialization of graphs, grounded on
//! `src/file_io_backends/petgraph.rs`'s `JsonGraphReadWriter`: a thin
//! `serde_json` wrapper letting any loader-built
//! [`Arg`](crate::graph::Arg) be cached to, and restored from, a file.

use std::fs::File;

use serde::{Deserialize, Serialize};

use crate::error::ArgIsoError;
use crate::graph::{Arg, ArgSource};

/// The on-disk representation: node attributes in node-id order, plus each
/// out-edge once as `(from, to, attr)`. In-adjacency and the degree/count
/// summaries `Arg` keeps are recomputed on load, not stored.
#[derive(Serialize, Deserialize)]
struct ArgDocument<N, E> {
    nodes: Vec<N>,
    edges: Vec<(u32, u32, E)>,
}

impl<N, E> ArgSource<N, E> for ArgDocument<N, E>
where
    N: Clone,
    E: Clone,
{
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
        self.edges
            .iter()
            .filter(|(from, _, _)| *from == node)
            .nth(i as usize)
            .map(|(_, to, attr)| (*to, attr.clone()))
            .expect("i < out_edge_count(node)")
    }
}

/// Writes `graph` to `path` as JSON. Overwrites any existing file.
pub fn save<N, E>(graph: &Arg<N, E>, path: &str) -> Result<(), ArgIsoError>
where
    N: Clone + Serialize,
    E: Clone + Serialize,
{
    let mut edges = Vec::with_capacity(graph.edge_count() as usize);
    for v in 0..graph.node_count() {
        for (&w, attr) in graph.out_neighbors(v).iter().zip(graph.out_edge_attrs(v)) {
            edges.push((v, w, attr.clone()));
        }
    }
    let doc = ArgDocument {
        nodes: (0..graph.node_count()).map(|v| graph.node_attr(v).clone()).collect(),
        edges,
    };
    let file = File::create(path)?;
    serde_json::to_writer(file, &doc)?;
    Ok(())
}

/// Reads a graph previously written by [`save`] from `path`.
pub fn load<N, E>(path: &str) -> Result<Arg<N, E>, ArgIsoError>
where
    N: Clone + std::hash::Hash + Eq + for<'de> Deserialize<'de>,
    E: Clone + std::hash::Hash + Eq + for<'de> Deserialize<'de>,
{
    let file = File::open(path)?;
    let doc: ArgDocument<N, E> = serde_json::from_reader(file)?;
    Arg::from_source(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::edge_text::EdgeTextSource;
    use std::env;
    use std::fs;

    #[test]
    fn round_trips_through_a_temp_file() {
        let src = EdgeTextSource::parse("1 2\n2 3\n3 1\n").unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();

        let mut path = env::temp_dir();
        path.push("argiso-json-round-trip-test.json");
        let path = path.to_str().unwrap().to_string();

        save(&g, &path).unwrap();
        let restored: Arg<(), ()> = load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(restored.node_count(), g.node_count());
        assert_eq!(restored.edge_count(), g.edge_count());
        for v in 0..g.node_count() {
            assert_eq!(restored.out_neighbors(v), g.out_neighbors(v));
        }
    }
}
