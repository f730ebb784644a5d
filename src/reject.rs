//! Cheap necessary-condition check on graph-wide counts, grounded on
//! `include/FastCheck.hpp`. Purely informational: a `false` result proves no
//! solution exists (invariant 9), but a `true` result promises nothing — the
//! engine must still confirm by search.

use crate::graph::Arg;
use crate::state::Semantics;

/// Returns `false` when the size/shape of `pattern` and `target` makes a
/// match provably impossible, `true` otherwise.
///
/// Under [`Semantics::SubIso`] each pattern-side count must not *exceed* the
/// target-side one; under [`Semantics::Iso`] they must be *equal*, matching
/// `FastCheck`'s `>` vs `!=` comparisons.
pub fn fast_reject<N, EP, ET>(pattern: &Arg<N, EP>, target: &Arg<N, ET>, semantics: Semantics) -> bool {
    let ok = |p: u32, t: u32| match semantics {
        Semantics::SubIso => p <= t,
        Semantics::Iso => p == t,
    };

    ok(pattern.node_count(), target.node_count())
        && ok(pattern.edge_count(), target.edge_count())
        && ok(pattern.max_in_degree(), target.max_in_degree())
        && ok(pattern.max_out_degree(), target.max_out_degree())
        && ok(pattern.max_degree(), target.max_degree())
        && ok(pattern.node_attr_count(), target.node_attr_count())
        && ok(pattern.edge_attr_count(), target.edge_attr_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::edge_text::EdgeTextSource;

    fn g(edges: &str) -> Arg<(), ()> {
        Arg::from_source(&EdgeTextSource::parse(edges).unwrap()).unwrap()
    }

    #[test]
    fn rejects_when_pattern_has_more_nodes() {
        let p = g("1 2\n2 3\n3 4\n4 1\n"); // 4-cycle
        let t = g("1 2\n2 3\n3 1\n"); // 3-cycle
        assert!(!fast_reject(&p, &t, Semantics::SubIso));
    }

    #[test]
    fn accepts_when_counts_allow_a_match() {
        let p = g("1 2\n");
        let t = g("1 2\n2 3\n3 1\n");
        assert!(fast_reject(&p, &t, Semantics::SubIso));
    }

    #[test]
    fn iso_rejects_on_unequal_node_count() {
        let p = g("1 2\n");
        let t = g("1 2\n2 3\n3 1\n");
        assert!(!fast_reject(&p, &t, Semantics::Iso));
    }
}
