//! The VF3 greedy pattern-node sorter, grounded on `include/VF3NodeSorter.hpp`.
//!
//! Produces a permutation σ of the pattern's nodes together with, for every
//! node but the first, the earlier neighbor (`pred`) that discovers it and
//! the direction (`dir`) of the connecting edge — the information
//! [`crate::state`] needs to generate target candidates.

use std::hash::Hash;

use crate::graph::{Arg, NIL};
use crate::probability::ProbabilityModel;

/// Direction of the edge connecting a pattern node `v` to its `pred`: `In`
/// if the edge runs `v -> pred` (so target candidates are drawn from
/// `pred`'s in-neighbor list), `Out` if it runs `pred -> v` (candidates
/// drawn from `pred`'s out-neighbor list). Matches `NODE_DIR_IN`/
/// `NODE_DIR_OUT` in `vf3_state.hpp`'s `ComputeFirstGraphTraversing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    None,
    In,
    Out,
}

/// The three ordering artifacts of spec §3: `sigma[k]` is the pattern node
/// chosen at depth `k`; `pred[v]`/`dir[v]` are indexed by pattern node id
/// (not by depth).
pub struct PatternOrder {
    pub sigma: Vec<u32>,
    pub pred: Vec<u32>,
    pub dir: Vec<Dir>,
}

impl PatternOrder {
    /// Depth at which node `v` is placed, i.e. the inverse of `sigma`.
    pub fn depth_of(&self, v: u32) -> u32 {
        self.sigma.iter().position(|&s| s == v).expect("v in pattern") as u32
    }
}

/// Builds a [`PatternOrder`] for `pattern`, using `probability` (computed
/// from the target, per §4.4) to rank candidates.
pub fn build_order<N, E, M>(pattern: &Arg<N, E>, probability: &M) -> PatternOrder
where
    N: Eq + Hash,
    M: ProbabilityModel<N>,
{
    let n = pattern.node_count();
    let deg: Vec<u32> = (0..n).map(|v| pattern.in_degree(v) + pattern.out_degree(v)).collect();
    let prob: Vec<f64> = (0..n)
        .map(|v| probability.probability(pattern.node_attr(v), pattern.in_degree(v), pattern.out_degree(v)))
        .collect();

    if n == 0 {
        return PatternOrder {
            sigma: Vec::new(),
            pred: Vec::new(),
            dir: Vec::new(),
        };
    }

    let mut in_sigma = vec![false; n as usize];
    let mut m_deg = vec![0u32; n as usize];
    let mut is_candidate = vec![false; n as usize];
    let mut candidates: Vec<u32> = Vec::new();
    let mut pred = vec![NIL; n as usize];
    let mut dir = vec![Dir::None; n as usize];

    // Initial node: least probability, ties broken by larger degree, then
    // by smaller id for determinism.
    let initial = (0..n)
        .min_by(|&a, &b| {
            prob[a as usize]
                .partial_cmp(&prob[b as usize])
                .unwrap()
                .then(deg[b as usize].cmp(&deg[a as usize]))
                .then(a.cmp(&b))
        })
        .unwrap();

    let mut sigma = Vec::with_capacity(n as usize);
    sigma.push(initial);
    in_sigma[initial as usize] = true;
    discover_neighbors(
        pattern, initial, &in_sigma, &mut m_deg, &mut is_candidate, &mut candidates, &mut pred, &mut dir,
    );

    while (sigma.len() as u32) < n {
        let next = if !candidates.is_empty() {
            let idx = candidates
                .iter()
                .enumerate()
                .min_by(|&(_, &a), &(_, &b)| {
                    m_deg[b as usize]
                        .cmp(&m_deg[a as usize])
                        .then(prob[a as usize].partial_cmp(&prob[b as usize]).unwrap())
                        .then(deg[b as usize].cmp(&deg[a as usize]))
                        .then(a.cmp(&b))
                })
                .map(|(i, _)| i)
                .unwrap();
            candidates.remove(idx)
        } else {
            // Candidate set exhausted before σ is full (disconnected
            // pattern): fall back to any unused node.
            (0..n)
                .filter(|&v| !in_sigma[v as usize])
                .min_by(|&a, &b| {
                    prob[a as usize]
                        .partial_cmp(&prob[b as usize])
                        .unwrap()
                        .then(deg[b as usize].cmp(&deg[a as usize]))
                        .then(a.cmp(&b))
                })
                .expect("unused node exists while sigma is not yet full")
        };

        sigma.push(next);
        in_sigma[next as usize] = true;
        discover_neighbors(
            pattern, next, &in_sigma, &mut m_deg, &mut is_candidate, &mut candidates, &mut pred, &mut dir,
        );
    }

    PatternOrder { sigma, pred, dir }
}

/// For every not-yet-placed neighbor of the just-placed node `x`: bump its
/// `m_deg`, and if this is the first time it is discovered, record `x` as
/// its `pred` (with the direction of the connecting edge) and add it to the
/// candidate set.
#[allow(clippy::too_many_arguments)]
fn discover_neighbors<N, E>(
    pattern: &Arg<N, E>,
    x: u32,
    in_sigma: &[bool],
    m_deg: &mut [u32],
    is_candidate: &mut [bool],
    candidates: &mut Vec<u32>,
    pred: &mut [u32],
    dir: &mut [Dir],
) {
    // `w` found via `x`'s in-neighbors means the pattern edge is `w -> x`;
    // the target counterpart candidate for `w` must then be drawn from
    // `u_pred`'s in-neighbor list, hence `Dir::In` (see `state::NextPair`).
    for &w in pattern.in_neighbors(x) {
        if in_sigma[w as usize] {
            continue;
        }
        m_deg[w as usize] += 1;
        if !is_candidate[w as usize] {
            is_candidate[w as usize] = true;
            pred[w as usize] = x;
            dir[w as usize] = Dir::In;
            candidates.push(w);
        }
    }
    // `w` found via `x`'s out-neighbors means the pattern edge is `x -> w`;
    // the candidate must come from `u_pred`'s out-neighbor list.
    for &w in pattern.out_neighbors(x) {
        if in_sigma[w as usize] {
            continue;
        }
        m_deg[w as usize] += 1;
        if !is_candidate[w as usize] {
            is_candidate[w as usize] = true;
            pred[w as usize] = x;
            dir[w as usize] = Dir::Out;
            candidates.push(w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::vf_text::VfTextSource;
    use crate::probability::UniformProbability;

    fn g(text: &str) -> Arg<i64, i64> {
        Arg::from_source(&VfTextSource::<i64, i64>::parse(text).unwrap()).unwrap()
    }

    #[test]
    fn sigma_is_a_permutation_with_pred_before_v() {
        let p = g("4\n0 1\n1 1\n2 1\n3 1\n1\n0 1 9\n1\n1 2 9\n1\n2 3 9\n0\n");
        let prob = UniformProbability::new(4);
        let order = build_order(&p, &prob);
        let mut seen: Vec<u32> = order.sigma.clone();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3]);

        for &v in &order.sigma[1..] {
            let pr = order.pred[v as usize];
            assert_ne!(pr, NIL);
            let depth_pred = order.depth_of(pr);
            let depth_v = order.depth_of(v);
            assert!(depth_pred < depth_v);
        }
    }

    #[test]
    fn disconnected_pattern_still_produces_full_permutation() {
        let p = g("2\n0 1\n1 1\n0\n0\n");
        let prob = UniformProbability::new(2);
        let order = build_order(&p, &prob);
        assert_eq!(order.sigma.len(), 2);
        assert_eq!(order.pred[order.sigma[1] as usize], NIL);
    }
}
