//! Target-conditioned node probability models, grounded on
//! `include/ProbabilityStrategy.hpp`. Feeds the pattern sorter (§4.5): a
//! lower probability is a better pivot because rare features prune the
//! search faster.

use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::Arg;

/// A node-probability model, computed once from the target graph and then
/// queried for every pattern node during ordering.
pub trait ProbabilityModel<N> {
    fn probability(&self, attr: &N, in_deg: u32, out_deg: u32) -> f64;
}

struct Frequencies {
    /// `freq[k]` = fraction of target nodes with the feature value `k`.
    freq: Vec<f64>,
}

impl Frequencies {
    fn from_counts(counts: Vec<u32>, n_t: u32) -> Self {
        let freq = counts
            .into_iter()
            .map(|c| c as f64 / n_t.max(1) as f64)
            .collect();
        Frequencies { freq }
    }

    fn at(&self, k: u32) -> f64 {
        self.freq.get(k as usize).copied().unwrap_or(0.0)
    }

    /// `Σ_{j≥k} freq[j]`: the probability that a random target node matches
    /// *at least* this feature value.
    fn tail_sum(&self, k: u32) -> f64 {
        self.freq.iter().skip(k as usize).sum()
    }
}

/// The three degree-distributions and the attribute-frequency map built
/// from a target graph, shared by [`IsoProbability`] and
/// [`SubIsoProbability`].
pub struct TargetStatistics<N> {
    p_in: Frequencies,
    p_out: Frequencies,
    p_tot: Frequencies,
    p_attr: HashMap<N, f64>,
    n_t: u32,
}

impl<N> TargetStatistics<N>
where
    N: Clone + Eq + Hash,
{
    pub fn build<E>(target: &Arg<N, E>) -> Self {
        let n_t = target.node_count();
        let mut in_counts = vec![0u32; target.max_in_degree() as usize + 1];
        let mut out_counts = vec![0u32; target.max_out_degree() as usize + 1];
        let mut tot_counts = vec![0u32; target.max_degree() as usize + 1];
        let mut attr_counts: HashMap<N, u32> = HashMap::new();

        for u in 0..n_t {
            let in_deg = target.in_degree(u);
            let out_deg = target.out_degree(u);
            in_counts[in_deg as usize] += 1;
            out_counts[out_deg as usize] += 1;
            tot_counts[(in_deg + out_deg) as usize] += 1;
            *attr_counts.entry(target.node_attr(u).clone()).or_insert(0) += 1;
        }

        let p_attr = attr_counts
            .into_iter()
            .map(|(attr, c)| (attr, c as f64 / n_t.max(1) as f64))
            .collect();

        TargetStatistics {
            p_in: Frequencies::from_counts(in_counts, n_t),
            p_out: Frequencies::from_counts(out_counts, n_t),
            p_tot: Frequencies::from_counts(tot_counts, n_t),
            p_attr,
            n_t,
        }
    }
}

/// `P_iso(v) = p_out(out_deg) · p_in(in_deg) · p_tot(deg) · p_attr(attr)`.
pub struct IsoProbability<'a, N> {
    stats: &'a TargetStatistics<N>,
}

impl<'a, N> IsoProbability<'a, N> {
    pub fn new(stats: &'a TargetStatistics<N>) -> Self {
        IsoProbability { stats }
    }
}

impl<'a, N: Eq + Hash> ProbabilityModel<N> for IsoProbability<'a, N> {
    fn probability(&self, attr: &N, in_deg: u32, out_deg: u32) -> f64 {
        let s = self.stats;
        s.p_out.at(out_deg) * s.p_in.at(in_deg) * s.p_tot.at(in_deg + out_deg)
            * s.p_attr.get(attr).copied().unwrap_or(0.0)
    }
}

/// Replaces each factor with its tail sum: the probability that a random
/// target node matches *at least* that feature, per spec §4.4.
pub struct SubIsoProbability<'a, N> {
    stats: &'a TargetStatistics<N>,
}

impl<'a, N> SubIsoProbability<'a, N> {
    pub fn new(stats: &'a TargetStatistics<N>) -> Self {
        SubIsoProbability { stats }
    }
}

impl<'a, N: Eq + Hash> ProbabilityModel<N> for SubIsoProbability<'a, N> {
    fn probability(&self, attr: &N, in_deg: u32, out_deg: u32) -> f64 {
        let s = self.stats;
        let p_attr_tail: f64 = if s.p_attr.get(attr).is_some() {
            // Tail sum "at" an attribute value has no total order to walk;
            // the original source only ever applies the tail-sum convention
            // to the numeric degree distributions. An attribute either
            // occurs in the target (its own frequency) or not (zero).
            s.p_attr.get(attr).copied().unwrap_or(0.0)
        } else {
            0.0
        };
        s.p_out.tail_sum(out_deg) * s.p_in.tail_sum(in_deg) * s.p_tot.tail_sum(in_deg + out_deg)
            * p_attr_tail
    }
}

/// Every node equally likely: `1/N`. Matches the original's
/// `UniformProbability` strategy, useful when attribute/degree skew carries
/// no useful ordering signal.
pub struct UniformProbability {
    p: f64,
}

impl UniformProbability {
    pub fn new(n_t: u32) -> Self {
        UniformProbability {
            p: 1.0 / n_t.max(1) as f64,
        }
    }
}

impl<N> ProbabilityModel<N> for UniformProbability {
    fn probability(&self, _attr: &N, _in_deg: u32, _out_deg: u32) -> f64 {
        self.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::vf_text::VfTextSource;

    #[test]
    fn rarer_attribute_has_lower_iso_probability() {
        let text = "3\n0 1\n1 1\n2 2\n0\n0\n0\n";
        let t: Arg<i64, i64> = Arg::from_source(&VfTextSource::<i64, i64>::parse(text).unwrap()).unwrap();
        let stats = TargetStatistics::build(&t);
        let model = IsoProbability::new(&stats);
        let p_common = model.probability(&1, 0, 0);
        let p_rare = model.probability(&2, 0, 0);
        assert!(p_rare < p_common);
    }

    #[test]
    fn sub_iso_tail_sum_is_monotone_non_increasing_in_degree() {
        let text = "3\n0 1\n1 1\n2 1\n1\n0 1 9\n1\n1 2 9\n0\n";
        let t: Arg<i64, i64> = Arg::from_source(&VfTextSource::<i64, i64>::parse(text).unwrap()).unwrap();
        let stats = TargetStatistics::build(&t);
        let model = SubIsoProbability::new(&stats);
        let p_deg0 = model.probability(&1, 0, 0);
        let p_deg1 = model.probability(&1, 0, 1);
        assert!(p_deg1 <= p_deg0);
    }
}
