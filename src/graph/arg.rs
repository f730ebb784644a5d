use std::collections::HashSet;
use std::hash::Hash;

use super::builder::ArgSource;
use super::NIL;
use crate::error::ArgIsoError;

/// An immutable, directed, node- and edge-attributed graph.
///
/// Adjacency is stored as one strictly-ascending `Vec<u32>` of neighbor ids
/// per node (both directions), with a parallel `Vec` of edge attributes.
/// Edge lookup (`has_edge`/`edge_attr`) is a binary search over the relevant
/// slice, following `ARGraph::GetNodeIndex` in the original C++ source.
#[derive(Debug, Clone)]
pub struct Arg<N, E> {
    node_attr: Vec<N>,
    out_nbr: Vec<Vec<u32>>,
    out_edge_attr: Vec<Vec<E>>,
    in_nbr: Vec<Vec<u32>>,
    in_edge_attr: Vec<Vec<E>>,
    edge_count: u32,
    max_deg_in: u32,
    max_deg_out: u32,
    max_degree: u32,
    node_attr_count: u32,
    edge_attr_count: u32,
}

impl<N, E> Arg<N, E>
where
    N: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
{
    /// Builds a graph from any [`ArgSource`] (the three loaders in
    /// [`crate::loaders`] all implement it). Rejects out-of-range node ids
    /// and duplicate parallel edges unconditionally: this is a library
    /// boundary a caller-supplied loader can violate, so the check is not
    /// gated behind `debug_assertions`.
    pub fn from_source<S: ArgSource<N, E>>(source: &S) -> Result<Self, ArgIsoError> {
        let n = source.node_count() as usize;

        let mut node_attr = Vec::with_capacity(n);
        let mut distinct_node_attrs: HashSet<N> = HashSet::new();
        for i in 0..n as u32 {
            let a = source.node_attr(i);
            distinct_node_attrs.insert(a.clone());
            node_attr.push(a);
        }

        let mut out_nbr: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut out_edge_attr: Vec<Vec<E>> = vec![Vec::new(); n];
        let mut max_deg_out = 0u32;

        // `in_pairs[i]` accumulates `(predecessor, attr)` for node `i`,
        // mirroring the original's `revmap` built while scanning out-edges.
        let mut in_pairs: Vec<Vec<(u32, E)>> = vec![Vec::new(); n];

        for i in 0..n as u32 {
            let k = source.out_edge_count(i);
            max_deg_out = max_deg_out.max(k);
            let mut edges = Vec::with_capacity(k as usize);
            for j in 0..k {
                let (n2, attr) = source.out_edge(i, j);
                if n2 as usize >= n {
                    return Err(ArgIsoError::Inconsistent(format!(
                        "node {i} has an out-edge to out-of-range node {n2} (graph has {n} nodes)"
                    )));
                }
                edges.push((n2, attr));
            }
            edges.sort_by_key(|(n2, _)| *n2);
            for w in edges.windows(2) {
                if w[0].0 == w[1].0 {
                    return Err(ArgIsoError::Inconsistent(format!(
                        "node {i} has a duplicate out-edge to node {}",
                        w[0].0
                    )));
                }
            }
            for (n2, attr) in &edges {
                in_pairs[*n2 as usize].push((i, attr.clone()));
            }
            let (nbrs, attrs): (Vec<u32>, Vec<E>) = edges.into_iter().unzip();
            out_nbr[i as usize] = nbrs;
            out_edge_attr[i as usize] = attrs;
        }

        let mut in_nbr: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut in_edge_attr: Vec<Vec<E>> = vec![Vec::new(); n];
        let mut max_deg_in = 0u32;
        let mut edge_attr_set: HashSet<E> = HashSet::new();
        let mut edge_count = 0u32;

        for i in 0..n {
            let mut pairs = std::mem::take(&mut in_pairs[i]);
            pairs.sort_by_key(|(pred, _)| *pred);
            max_deg_in = max_deg_in.max(pairs.len() as u32);
            for (_, attr) in &pairs {
                edge_attr_set.insert(attr.clone());
            }
            let (nbrs, attrs): (Vec<u32>, Vec<E>) = pairs.into_iter().unzip();
            in_nbr[i] = nbrs;
            in_edge_attr[i] = attrs;
        }

        let mut max_degree = 0u32;
        for i in 0..n {
            let deg = (in_nbr[i].len() + out_nbr[i].len()) as u32;
            edge_count += deg;
            max_degree = max_degree.max(deg);
        }
        // Each edge was counted from both endpoints.
        edge_count /= 2;

        Ok(Arg {
            node_attr,
            out_nbr,
            out_edge_attr,
            in_nbr,
            in_edge_attr,
            edge_count,
            max_deg_in,
            max_deg_out,
            max_degree,
            node_attr_count: distinct_node_attrs.len() as u32,
            edge_attr_count: edge_attr_set.len() as u32,
        })
    }
}

impl<N, E> Arg<N, E> {
    pub fn node_count(&self) -> u32 {
        self.node_attr.len() as u32
    }

    pub fn edge_count(&self) -> u32 {
        self.edge_count
    }

    pub fn node_attr(&self, node: u32) -> &N {
        &self.node_attr[node as usize]
    }

    pub fn out_degree(&self, node: u32) -> u32 {
        self.out_nbr[node as usize].len() as u32
    }

    pub fn in_degree(&self, node: u32) -> u32 {
        self.in_nbr[node as usize].len() as u32
    }

    pub fn out_neighbors(&self, node: u32) -> &[u32] {
        &self.out_nbr[node as usize]
    }

    pub fn in_neighbors(&self, node: u32) -> &[u32] {
        &self.in_nbr[node as usize]
    }

    pub fn out_edge_attrs(&self, node: u32) -> &[E] {
        &self.out_edge_attr[node as usize]
    }

    pub fn in_edge_attrs(&self, node: u32) -> &[E] {
        &self.in_edge_attr[node as usize]
    }

    /// Binary search for `to` in `from`'s out-neighbor set, returning its
    /// index into `out_neighbors(from)`/`out_edge_attrs(from)` if present.
    fn out_index(&self, from: u32, to: u32) -> Option<usize> {
        self.out_nbr[from as usize].binary_search(&to).ok()
    }

    pub fn has_edge(&self, from: u32, to: u32) -> bool {
        debug_assert_ne!(from, NIL);
        debug_assert_ne!(to, NIL);
        self.out_index(from, to).is_some()
    }

    pub fn edge_attr(&self, from: u32, to: u32) -> Option<&E> {
        self.out_index(from, to)
            .map(|idx| &self.out_edge_attr[from as usize][idx])
    }

    pub fn max_in_degree(&self) -> u32 {
        self.max_deg_in
    }

    pub fn max_out_degree(&self) -> u32 {
        self.max_deg_out
    }

    pub fn max_degree(&self) -> u32 {
        self.max_degree
    }

    pub fn node_attr_count(&self) -> u32 {
        self.node_attr_count
    }

    pub fn edge_attr_count(&self) -> u32 {
        self.edge_attr_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::edge_text::EdgeTextSource;

    #[test]
    fn triangle_has_consistent_degrees() {
        let src = EdgeTextSource::parse("1 2\n2 3\n3 1\n").unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        for i in 0..3 {
            assert_eq!(g.out_degree(i) + g.in_degree(i), 4);
        }
    }

    #[test]
    fn out_neighbors_are_sorted() {
        let src = EdgeTextSource::parse("1 4\n1 2\n1 3\n").unwrap();
        let g: Arg<(), ()> = Arg::from_source(&src).unwrap();
        let nbrs = g.out_neighbors(0);
        let mut sorted = nbrs.to_vec();
        sorted.sort();
        assert_eq!(nbrs, sorted.as_slice());
    }

    #[test]
    fn rejects_out_of_range_edge() {
        struct Bad;
        impl ArgSource<(), ()> for Bad {
            fn node_count(&self) -> u32 {
                2
            }
            fn node_attr(&self, _node: u32) {}
            fn out_edge_count(&self, node: u32) -> u32 {
                if node == 0 {
                    1
                } else {
                    0
                }
            }
            fn out_edge(&self, _node: u32, _i: u32) -> (u32, ()) {
                (5, ())
            }
        }
        let err = Arg::<(), ()>::from_source(&Bad {}).unwrap_err();
        assert!(matches!(err, ArgIsoError::Inconsistent(_)));
    }
}
