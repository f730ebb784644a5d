use crate::error::ArgIsoError;
use crate::graph::ArgSource;

/// Parsed buffer for the read-only, historical binary "ARG" format (spec
/// §6): a little-endian stream of 16-bit words, `N` followed by, for each
/// node, `out_degree` then `out_degree` target node ids. Carries no
/// attributes, matching the format.
pub struct ArgBinarySource {
    out_edges: Vec<Vec<u32>>,
}

impl ArgBinarySource {
    pub fn parse(bytes: &[u8]) -> Result<Self, ArgIsoError> {
        let fmt = "arg-binary";
        let mut words = bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]]));

        let n = words.next().ok_or_else(|| ArgIsoError::InputFormat {
            format: fmt,
            location: "header".into(),
            reason: "empty file, expected node count".into(),
        })? as u32;

        let mut out_edges: Vec<Vec<u32>> = Vec::with_capacity(n as usize);
        for node in 0..n {
            let k = words.next().ok_or_else(|| ArgIsoError::InputFormat {
                format: fmt,
                location: format!("node {node}"),
                reason: "unexpected end of stream reading out-degree".into(),
            })? as u32;
            let mut edges = Vec::with_capacity(k as usize);
            for _ in 0..k {
                let target = words.next().ok_or_else(|| ArgIsoError::InputFormat {
                    format: fmt,
                    location: format!("node {node}"),
                    reason: "unexpected end of stream reading an edge target".into(),
                })? as u32;
                edges.push(target);
            }
            out_edges.push(edges);
        }

        if bytes.len() % 2 != 0 {
            return Err(ArgIsoError::InputFormat {
                format: fmt,
                location: "trailer".into(),
                reason: "file length is not a whole number of 16-bit words".into(),
            });
        }

        Ok(ArgBinarySource { out_edges })
    }
}

impl ArgSource<(), ()> for ArgBinarySource {
    fn node_count(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn node_attr(&self, _node: u32) {}

    fn out_edge_count(&self, node: u32) -> u32 {
        self.out_edges[node as usize].len() as u32
    }

    fn out_edge(&self, node: u32, i: u32) -> (u32, ()) {
        (self.out_edges[node as usize][i as usize], ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Arg;

    #[test]
    fn parses_two_node_chain() {
        // N=2, node 0: out_degree 1, target 1; node 1: out_degree 0.
        let words: [u16; 4] = [2, 1, 1, 0];
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let src = ArgBinarySource::parse(&bytes).unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        assert_eq!(g.node_count(), 2);
        assert!(g.has_edge(0, 1));
    }
}
