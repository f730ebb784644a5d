use std::collections::BTreeSet;

use super::Tokenizer;
use crate::error::ArgIsoError;
use crate::graph::ArgSource;

/// Parsed buffer for the "edge" text format (spec §6): repeated 1-based
/// `u v` pairs, one per line, until EOF; `#`-led lines and blank lines are
/// skipped. Grounded on `EdgeStreamARGLoader`: duplicate edges collapse
/// (the original stores them in a `map<nodeID_t, Empty>` keyed by
/// neighbor), self-loops are rejected, and isolated nodes are by default
/// removed with survivors renumbered densely from 0.
#[derive(Debug)]
pub struct EdgeTextSource {
    node_count: u32,
    out_edges: Vec<BTreeSet<u32>>,
}

impl EdgeTextSource {
    /// Parses with the original's defaults: directed, isolated nodes removed.
    pub fn parse(text: &str) -> Result<Self, ArgIsoError> {
        Self::parse_with_options(text, false, true)
    }

    pub fn parse_with_options(
        text: &str,
        undirected: bool,
        remove_isolated_nodes: bool,
    ) -> Result<Self, ArgIsoError> {
        let fmt = "edge";
        let mut tok = Tokenizer::new(text);
        let mut raw_edges: Vec<(u32, u32)> = Vec::new();
        let mut count = 0u32;

        loop {
            let a = match tok.next() {
                Some(a) => a,
                None => break,
            };
            let b = tok.next().ok_or_else(|| ArgIsoError::InputFormat {
                format: fmt,
                location: "trailing token".into(),
                reason: "odd number of tokens; expected u/v pairs".into(),
            })?;
            let u1: u32 = a.parse().map_err(|e| ArgIsoError::InputFormat {
                format: fmt,
                location: "edge endpoint".into(),
                reason: format!("expected an integer, found {a:?}: {e}"),
            })?;
            let v1: u32 = b.parse().map_err(|e| ArgIsoError::InputFormat {
                format: fmt,
                location: "edge endpoint".into(),
                reason: format!("expected an integer, found {b:?}: {e}"),
            })?;
            if u1 == 0 || v1 == 0 {
                return Err(ArgIsoError::InputFormat {
                    format: fmt,
                    location: "edge endpoint".into(),
                    reason: "node ids are 1-based; 0 is not a valid node".into(),
                });
            }
            let (u, v) = (u1 - 1, v1 - 1);
            if u == v {
                return Err(ArgIsoError::InputFormat {
                    format: fmt,
                    location: format!("edge ({u1}, {v1})"),
                    reason: "self-loops are not allowed".into(),
                });
            }
            count = count.max(u + 1).max(v + 1);
            raw_edges.push((u, v));
        }

        let mut forward: Vec<bool> = vec![false; count as usize];
        let mut sets: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); count as usize];
        for (u, v) in raw_edges {
            forward[u as usize] = true;
            forward[v as usize] = true;
            sets[u as usize].insert(v);
            if undirected {
                sets[v as usize].insert(u);
            }
        }

        if !remove_isolated_nodes {
            return Ok(EdgeTextSource {
                node_count: count,
                out_edges: sets,
            });
        }

        // Densely renumber the nodes that have at least one edge, preserving
        // their relative order, as `EdgeStreamARGLoader`'s forward/backward
        // maps do.
        let mut new_id = vec![u32::MAX; count as usize];
        let mut node_count = 0u32;
        for (old, keep) in forward.iter().enumerate() {
            if *keep {
                new_id[old] = node_count;
                node_count += 1;
            }
        }
        let mut out_edges = vec![BTreeSet::new(); node_count as usize];
        for (old, nbrs) in sets.into_iter().enumerate() {
            if new_id[old] == u32::MAX {
                continue;
            }
            for nbr in nbrs {
                out_edges[new_id[old] as usize].insert(new_id[nbr as usize]);
            }
        }

        Ok(EdgeTextSource {
            node_count,
            out_edges,
        })
    }
}

impl ArgSource<(), ()> for EdgeTextSource {
    fn node_count(&self) -> u32 {
        self.node_count
    }

    fn node_attr(&self, _node: u32) {}

    fn out_edge_count(&self, node: u32) -> u32 {
        self.out_edges[node as usize].len() as u32
    }

    fn out_edge(&self, node: u32, i: u32) -> (u32, ()) {
        let nbr = *self.out_edges[node as usize].iter().nth(i as usize).unwrap();
        (nbr, ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Arg;

    #[test]
    fn removes_isolated_nodes_by_default() {
        // node 4 (1-based) has no edges and should be dropped.
        let src = EdgeTextSource::parse("1 2\n2 3\n").unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn undirected_symmetrizes() {
        let src = EdgeTextSource::parse_with_options("1 2\n", true, true).unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 0));
    }

    #[test]
    fn rejects_self_loop() {
        let err = EdgeTextSource::parse("1 1\n").unwrap_err();
        assert!(matches!(err, ArgIsoError::InputFormat { .. }));
    }
}
