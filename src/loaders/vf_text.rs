use std::fmt::Display;
use std::str::FromStr;

use super::Tokenizer;
use crate::error::ArgIsoError;
use crate::graph::ArgSource;

/// Parsed buffer for the "vf" text format (spec §6): one integer node
/// count, `N` `i <attr_i>` lines, then per node an out-degree and that many
/// `i j <edge_attr>` triples. Generic over the attribute type so callers can
/// instantiate with an integer label or a text token, per spec's "the
/// implementation instantiates with either a 32-bit integer attribute or a
/// text token" note.
#[derive(Debug)]
pub struct VfTextSource<N, E> {
    node_attr: Vec<N>,
    out_edges: Vec<Vec<(u32, E)>>,
}

impl<N, E> VfTextSource<N, E>
where
    N: FromStr,
    N::Err: Display,
    E: FromStr,
    E::Err: Display,
{
    pub fn parse(text: &str) -> Result<Self, ArgIsoError> {
        let mut tok = Tokenizer::new(text);
        let fmt = "vf";

        let n: u32 = next_uint(&mut tok, fmt, "node count")?;

        let mut node_attr = Vec::with_capacity(n as usize);
        for expected in 0..n {
            let i: u32 = next_uint(&mut tok, fmt, "node index")?;
            if i != expected {
                return Err(ArgIsoError::InputFormat {
                    format: fmt,
                    location: format!("node line {expected}"),
                    reason: format!("expected node index {expected}, found {i}"),
                });
            }
            let attr = next_attr::<N>(&mut tok, fmt, "node attribute")?;
            node_attr.push(attr);
        }

        let mut out_edges: Vec<Vec<(u32, E)>> = Vec::with_capacity(n as usize);
        for node in 0..n {
            let k: u32 = next_uint(&mut tok, fmt, "out-degree")?;
            let mut edges = Vec::with_capacity(k as usize);
            for _ in 0..k {
                let i: u32 = next_uint(&mut tok, fmt, "edge source")?;
                if i != node {
                    return Err(ArgIsoError::InputFormat {
                        format: fmt,
                        location: format!("edges of node {node}"),
                        reason: format!("expected edge source {node}, found {i}"),
                    });
                }
                let j: u32 = next_uint(&mut tok, fmt, "edge target")?;
                if j == node {
                    return Err(ArgIsoError::InputFormat {
                        format: fmt,
                        location: format!("edges of node {node}"),
                        reason: "self-loops are not allowed".into(),
                    });
                }
                if j >= n {
                    return Err(ArgIsoError::InputFormat {
                        format: fmt,
                        location: format!("edges of node {node}"),
                        reason: format!("edge target {j} is out of range (N={n})"),
                    });
                }
                let attr = next_attr::<E>(&mut tok, fmt, "edge attribute")?;
                edges.push((j, attr));
            }
            out_edges.push(edges);
        }

        Ok(VfTextSource {
            node_attr,
            out_edges,
        })
    }
}

fn next_uint(tok: &mut Tokenizer<'_>, fmt: &'static str, what: &str) -> Result<u32, ArgIsoError> {
    let raw = tok.next().ok_or_else(|| ArgIsoError::InputFormat {
        format: fmt,
        location: what.to_string(),
        reason: "unexpected end of input".into(),
    })?;
    raw.parse::<u32>().map_err(|e| ArgIsoError::InputFormat {
        format: fmt,
        location: what.to_string(),
        reason: format!("expected an integer, found {raw:?}: {e}"),
    })
}

fn next_attr<A>(tok: &mut Tokenizer<'_>, fmt: &'static str, what: &str) -> Result<A, ArgIsoError>
where
    A: FromStr,
    A::Err: Display,
{
    let raw = tok.next().ok_or_else(|| ArgIsoError::InputFormat {
        format: fmt,
        location: what.to_string(),
        reason: "unexpected end of input".into(),
    })?;
    raw.parse::<A>().map_err(|e| ArgIsoError::InputFormat {
        format: fmt,
        location: what.to_string(),
        reason: format!("{e}"),
    })
}

impl<N, E> ArgSource<N, E> for VfTextSource<N, E>
where
    N: Clone,
    E: Clone,
{
    fn node_count(&self) -> u32 {
        self.node_attr.len() as u32
    }

    fn node_attr(&self, node: u32) -> N {
        self.node_attr[node as usize].clone()
    }

    fn out_edge_count(&self, node: u32) -> u32 {
        self.out_edges[node as usize].len() as u32
    }

    fn out_edge(&self, node: u32, i: u32) -> (u32, E) {
        self.out_edges[node as usize][i as usize].clone()
    }
}
