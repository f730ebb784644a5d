//! The matching state machine, grounded on `include/vf3_state.hpp` and
//! `include/State.hpp`.
//!
//! A [`MatchingState`] owns the incremental partial mapping between a
//! pattern `P` and a target `T`: the core sets, the target-side terminal-set
//! bookkeeping, and the per-class counters used by the lookahead pruning in
//! [`MatchingState::is_feasible`]. The read-only, σ-derived pattern-side
//! profile ([`PatternProfile`]) is computed once and shared by every state
//! in a search.

use crate::classify::NodeClasses;
use crate::graph::{Arg, NIL};
use crate::ordering::{Dir, PatternOrder};

/// Isomorphism vs. sub-isomorphism: orthogonal to [`crate::graph`]'s
/// induced-vs-monomorphism flag. Under `Iso`, degree and lookahead checks
/// are equalities (`include/vf3_state.hpp`'s `IsFeasiblePair`/`IsDead`);
/// under `SubIso` they are the `≤` inequalities of spec.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Semantics {
    Iso,
    SubIso,
}

/// Which of the three VF3 state flavors governs lookahead pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    /// Full VF3: lookahead and terminal-set bookkeeping always active.
    Full,
    /// VF3K: lookahead active only while `depth <= k`.
    Capped(u32),
    /// VF3-Light: lookahead omitted entirely; only edge-consistency and
    /// attribute/degree checks apply.
    Light,
}

/// Whether `induced` semantics additionally forbid extra target edges
/// between matched nodes (spec §3/§4.6 point 3).
pub type Induced = bool;

/// The σ-derived, read-only statistics shared by every state in a search:
/// for each depth `d` (`0..=|V(P)|`), the size of the pattern's terminal
/// sets once `σ[0..d]` is placed, plus the per-depth `termin`/`termout`/
/// `new` increments produced by placing `σ[d]` itself.
pub struct PatternProfile {
    t1_in: Vec<u32>,
    t1_out: Vec<u32>,
    t1_both: Vec<u32>,
    t1_in_c: Vec<Vec<u32>>,
    t1_out_c: Vec<Vec<u32>>,
    t1_both_c: Vec<Vec<u32>>,
    termin1: Vec<u32>,
    termout1: Vec<u32>,
    new1: Vec<u32>,
    termin1_c: Vec<Vec<u32>>,
    termout1_c: Vec<Vec<u32>>,
    new1_c: Vec<Vec<u32>>,
}

impl PatternProfile {
    pub fn build<N, E>(pattern: &Arg<N, E>, order: &PatternOrder, classes: &NodeClasses) -> Self {
        let n = pattern.node_count() as usize;
        let c = classes.classes_count() as usize;

        let mut in_set = vec![false; n];
        let mut out_set = vec![false; n];
        let mut inserted = vec![false; n];

        let mut t1_in = vec![0u32; n + 1];
        let mut t1_out = vec![0u32; n + 1];
        let mut t1_both = vec![0u32; n + 1];
        let mut t1_in_c = vec![vec![0u32; c]; n + 1];
        let mut t1_out_c = vec![vec![0u32; c]; n + 1];
        let mut t1_both_c = vec![vec![0u32; c]; n + 1];

        let mut termin1 = vec![0u32; n];
        let mut termout1 = vec![0u32; n];
        let mut new1 = vec![0u32; n];
        let mut termin1_c = vec![vec![0u32; c]; n];
        let mut termout1_c = vec![vec![0u32; c]; n];
        let mut new1_c = vec![vec![0u32; c]; n];

        for depth in 0..n {
            let node = order.sigma[depth];
            let node_c = classes.class_p(node) as usize;
            inserted[node as usize] = true;

            let mut classify_unplaced = |neigh: u32| {
                if inserted[neigh as usize] {
                    return;
                }
                let nc = classes.class_p(neigh) as usize;
                if in_set[neigh as usize] {
                    termin1[depth] += 1;
                    termin1_c[depth][nc] += 1;
                }
                if out_set[neigh as usize] {
                    termout1[depth] += 1;
                    termout1_c[depth][nc] += 1;
                }
                if !in_set[neigh as usize] && !out_set[neigh as usize] {
                    new1[depth] += 1;
                    new1_c[depth][nc] += 1;
                }
            };
            for &neigh in pattern.in_neighbors(node) {
                classify_unplaced(neigh);
            }
            for &neigh in pattern.out_neighbors(node) {
                classify_unplaced(neigh);
            }

            t1_in[depth + 1] = t1_in[depth];
            t1_out[depth + 1] = t1_out[depth];
            t1_both[depth + 1] = t1_both[depth];
            for j in 0..c {
                t1_in_c[depth + 1][j] = t1_in_c[depth][j];
                t1_out_c[depth + 1][j] = t1_out_c[depth][j];
                t1_both_c[depth + 1][j] = t1_both_c[depth][j];
            }

            if !in_set[node as usize] {
                in_set[node as usize] = true;
                t1_in[depth + 1] += 1;
                t1_in_c[depth + 1][node_c] += 1;
                if out_set[node as usize] {
                    t1_both[depth + 1] += 1;
                    t1_both_c[depth + 1][node_c] += 1;
                }
            }
            if !out_set[node as usize] {
                out_set[node as usize] = true;
                t1_out[depth + 1] += 1;
                t1_out_c[depth + 1][node_c] += 1;
                if in_set[node as usize] {
                    t1_both[depth + 1] += 1;
                    t1_both_c[depth + 1][node_c] += 1;
                }
            }

            for &other in pattern.in_neighbors(node) {
                if !in_set[other as usize] {
                    let oc = classes.class_p(other) as usize;
                    in_set[other as usize] = true;
                    t1_in[depth + 1] += 1;
                    t1_in_c[depth + 1][oc] += 1;
                    if out_set[other as usize] {
                        t1_both[depth + 1] += 1;
                        t1_both_c[depth + 1][oc] += 1;
                    }
                }
            }
            for &other in pattern.out_neighbors(node) {
                if !out_set[other as usize] {
                    let oc = classes.class_p(other) as usize;
                    out_set[other as usize] = true;
                    t1_out[depth + 1] += 1;
                    t1_out_c[depth + 1][oc] += 1;
                    if in_set[other as usize] {
                        t1_both[depth + 1] += 1;
                        t1_both_c[depth + 1][oc] += 1;
                    }
                }
            }
        }

        PatternProfile {
            t1_in,
            t1_out,
            t1_both,
            t1_in_c,
            t1_out_c,
            t1_both_c,
            termin1,
            termout1,
            new1,
            termin1_c,
            termout1_c,
            new1_c,
        }
    }
}

/// The incremental partial mapping between `P` and `T` (spec §3's "Matching
/// state S"), plus everything `IsFeasible`/`AddPair`/`Backtrack` touch.
pub struct MatchingState<'a, N, EP, ET> {
    pattern: &'a Arg<N, EP>,
    target: &'a Arg<N, ET>,
    order: &'a PatternOrder,
    classes: &'a NodeClasses,
    profile: &'a PatternProfile,
    induced: Induced,
    semantics: Semantics,
    lookahead: Lookahead,

    core_p: Vec<u32>,
    core_t: Vec<u32>,
    depth: u32,

    in_t: Vec<u32>,
    out_t: Vec<u32>,
    t2_in: u32,
    t2_out: u32,
    t2_both: u32,
    t2_in_c: Vec<u32>,
    t2_out_c: Vec<u32>,
    t2_both_c: Vec<u32>,
}

/// What changed in one `add_pair` call, so `retract` can undo exactly that
/// and nothing else (spec invariant 6, backtrack idempotence).
struct AddPairUndo {
    v: u32,
    u: u32,
    self_entered_in: bool,
    self_entered_out: bool,
    neighbors_entered_in: Vec<u32>,
    neighbors_entered_out: Vec<u32>,
}

/// Manual `Clone`, mirroring the original's `VFState` copy constructor
/// (`MatchingEngine::ExploreState` copies the parent state before extending
/// it): derived `Clone` would wrongly require `N: Clone`/`EP: Clone`/
/// `ET: Clone` even though only shared references to those graphs are held.
impl<'a, N, EP, ET> Clone for MatchingState<'a, N, EP, ET> {
    fn clone(&self) -> Self {
        MatchingState {
            pattern: self.pattern,
            target: self.target,
            order: self.order,
            classes: self.classes,
            profile: self.profile,
            induced: self.induced,
            semantics: self.semantics,
            lookahead: self.lookahead,
            core_p: self.core_p.clone(),
            core_t: self.core_t.clone(),
            depth: self.depth,
            in_t: self.in_t.clone(),
            out_t: self.out_t.clone(),
            t2_in: self.t2_in,
            t2_out: self.t2_out,
            t2_both: self.t2_both,
            t2_in_c: self.t2_in_c.clone(),
            t2_out_c: self.t2_out_c.clone(),
            t2_both_c: self.t2_both_c.clone(),
        }
    }
}

impl<'a, N, EP, ET> MatchingState<'a, N, EP, ET>
where
    N: Eq,
    EP: Eq,
    ET: Eq,
{
    pub fn new(
        pattern: &'a Arg<N, EP>,
        target: &'a Arg<N, ET>,
        order: &'a PatternOrder,
        classes: &'a NodeClasses,
        profile: &'a PatternProfile,
        induced: Induced,
        semantics: Semantics,
        lookahead: Lookahead,
    ) -> Self {
        let n1 = pattern.node_count() as usize;
        let n2 = target.node_count() as usize;
        let c = classes.classes_count() as usize;
        MatchingState {
            pattern,
            target,
            order,
            classes,
            profile,
            induced,
            semantics,
            lookahead,
            core_p: vec![NIL; n1],
            core_t: vec![NIL; n2],
            depth: 0,
            in_t: vec![0; n2],
            out_t: vec![0; n2],
            t2_in: 0,
            t2_out: 0,
            t2_both: 0,
            t2_in_c: vec![0; c],
            t2_out_c: vec![0; c],
            t2_both_c: vec![0; c],
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn is_goal(&self) -> bool {
        self.depth as usize == self.pattern.node_count() as usize
    }

    pub fn core_t_of(&self, v: u32) -> u32 {
        self.core_p[v as usize]
    }

    /// The pattern node `NextPair`/`IsFeasiblePair` operate on at the
    /// current depth: `sigma[depth]`, undefined once `is_goal()`.
    pub fn sigma_at_current_depth(&self) -> u32 {
        self.order.sigma[self.depth as usize]
    }

    /// The current solution, as `(v, u)` pairs in σ order. Only meaningful
    /// when [`Self::is_goal`].
    pub fn mapping(&self) -> Vec<(u32, u32)> {
        self.order
            .sigma
            .iter()
            .map(|&v| (v, self.core_p[v as usize]))
            .collect()
    }

    fn lookahead_active(&self) -> bool {
        match self.lookahead {
            Lookahead::Full => true,
            Lookahead::Capped(k) => self.depth <= k,
            Lookahead::Light => false,
        }
    }

    /// `NextPair`: the candidate target node following `prev` (or the first
    /// candidate, if `prev` is [`NIL`]) for the pattern node at the current
    /// depth. Returns `None` once candidates are exhausted.
    pub fn next_pair(&self, prev: u32) -> Option<u32> {
        let v = self.order.sigma[self.depth as usize];
        let c = self.classes.class_p(v);

        if let Some(pred_v) = self.pred_of(v) {
            let pred_u = self.core_p[pred_v as usize];
            debug_assert_ne!(pred_u, NIL);
            let candidates: &[u32] = match self.order.dir[v as usize] {
                Dir::In => self.target.in_neighbors(pred_u),
                Dir::Out => self.target.out_neighbors(pred_u),
                Dir::None => unreachable!("pred exists but dir is None"),
            };
            let start = match prev {
                NIL => 0,
                _ => candidates.iter().position(|&x| x == prev).map(|i| i + 1)?,
            };
            candidates[start..]
                .iter()
                .copied()
                .find(|&u| self.core_t[u as usize] == NIL && self.classes.class_t(u) == c)
        } else {
            let start = if prev == NIL { 0 } else { prev + 1 };
            (start..self.target.node_count())
                .find(|&u| self.core_t[u as usize] == NIL && self.classes.class_t(u) == c)
        }
    }

    fn pred_of(&self, v: u32) -> Option<u32> {
        let p = self.order.pred[v as usize];
        if p == NIL {
            None
        } else {
            Some(p)
        }
    }

    /// `IsFeasiblePair`: edge-consistency plus attribute/degree checks, and
    /// (when lookahead is active) the class-aware lookahead pruning test.
    pub fn is_feasible<NE, EE>(&self, v: u32, u: u32, node_eq: &NE, edge_p_eq_t: &EE) -> bool
    where
        NE: Fn(&N, &N) -> bool,
        EE: Fn(&EP, &ET) -> bool,
    {
        debug_assert_eq!(self.core_p[v as usize], NIL);
        debug_assert_eq!(self.core_t[u as usize], NIL);

        if !node_eq(self.pattern.node_attr(v), self.target.node_attr(u)) {
            return false;
        }

        let degree_ok = |p: u32, t: u32| match self.semantics {
            Semantics::Iso => p == t,
            Semantics::SubIso => p <= t,
        };
        if !degree_ok(self.pattern.in_degree(v), self.target.in_degree(u))
            || !degree_ok(self.pattern.out_degree(v), self.target.out_degree(u))
        {
            return false;
        }

        for (&w, attr_p) in self.pattern.out_neighbors(v).iter().zip(self.pattern.out_edge_attrs(v)) {
            let mapped = self.core_p[w as usize];
            if mapped != NIL {
                match self.target.edge_attr(u, mapped) {
                    Some(attr_t) if edge_p_eq_t(attr_p, attr_t) => {}
                    _ => return false,
                }
            }
        }
        for (&w, attr_p) in self.pattern.in_neighbors(v).iter().zip(self.pattern.in_edge_attrs(v)) {
            let mapped = self.core_p[w as usize];
            if mapped != NIL {
                match self.target.edge_attr(mapped, u) {
                    Some(attr_t) if edge_p_eq_t(attr_p, attr_t) => {}
                    _ => return false,
                }
            }
        }

        if self.induced {
            for &w2 in self.target.out_neighbors(u) {
                let mapped = self.core_t[w2 as usize];
                if mapped != NIL && !self.pattern.has_edge(v, mapped) {
                    return false;
                }
            }
            for &w2 in self.target.in_neighbors(u) {
                let mapped = self.core_t[w2 as usize];
                if mapped != NIL && !self.pattern.has_edge(mapped, v) {
                    return false;
                }
            }
        }

        if !self.lookahead_active() {
            return true;
        }

        let c = self.classes.classes_count() as usize;
        let mut termin2 = 0u32;
        let mut termout2 = 0u32;
        let mut new2 = 0u32;
        let mut termin2_c = vec![0u32; c];
        let mut termout2_c = vec![0u32; c];
        let mut new2_c = vec![0u32; c];

        let mut classify = |w2: u32, termin2: &mut u32, termout2: &mut u32, new2: &mut u32, termin2_c: &mut [u32], termout2_c: &mut [u32], new2_c: &mut [u32]| {
            if self.core_t[w2 as usize] != NIL {
                return;
            }
            let wc = self.classes.class_t(w2) as usize;
            if self.in_t[w2 as usize] != 0 {
                *termin2 += 1;
                termin2_c[wc] += 1;
            }
            if self.out_t[w2 as usize] != 0 {
                *termout2 += 1;
                termout2_c[wc] += 1;
            }
            if self.in_t[w2 as usize] == 0 && self.out_t[w2 as usize] == 0 {
                *new2 += 1;
                new2_c[wc] += 1;
            }
        };
        for &w2 in self.target.out_neighbors(u) {
            classify(w2, &mut termin2, &mut termout2, &mut new2, &mut termin2_c, &mut termout2_c, &mut new2_c);
        }
        for &w2 in self.target.in_neighbors(u) {
            classify(w2, &mut termin2, &mut termout2, &mut new2, &mut termin2_c, &mut termout2_c, &mut new2_c);
        }

        let d = self.depth as usize;
        let cmp = |p: u32, t: u32| match self.semantics {
            Semantics::Iso => p == t,
            Semantics::SubIso => p <= t,
        };

        if !cmp(self.profile.termin1[d], termin2) || !cmp(self.profile.termout1[d], termout2) {
            return false;
        }
        for i in 0..c {
            if !cmp(self.profile.termin1_c[d][i], termin2_c[i]) || !cmp(self.profile.termout1_c[d][i], termout2_c[i]) {
                return false;
            }
        }
        if !cmp(self.profile.new1[d], new2) {
            return false;
        }
        for i in 0..c {
            if !cmp(self.profile.new1_c[d][i], new2_c[i]) {
                return false;
            }
        }

        true
    }

    /// `IsDead`: true when the current counters already prove no extension
    /// at this depth can reach a goal.
    pub fn is_dead(&self) -> bool {
        if !self.lookahead_active() {
            return false;
        }
        let d = self.depth as usize;
        let cmp = |p: u32, t: u32| match self.semantics {
            Semantics::Iso => p == t,
            Semantics::SubIso => p <= t,
        };
        if self.semantics == Semantics::Iso && self.pattern.node_count() != self.target.node_count() {
            return true;
        }
        if !cmp(self.profile.t1_both[d], self.t2_both)
            || !cmp(self.profile.t1_in[d], self.t2_in)
            || !cmp(self.profile.t1_out[d], self.t2_out)
        {
            return true;
        }
        for c in 0..self.classes.classes_count() as usize {
            if !cmp(self.profile.t1_both_c[d][c], self.t2_both_c[c])
                || !cmp(self.profile.t1_in_c[d][c], self.t2_in_c[c])
                || !cmp(self.profile.t1_out_c[d][c], self.t2_out_c[c])
            {
                return true;
            }
        }
        false
    }

    /// `AddPair`: commits `(v, u)` to the core and updates the target-side
    /// terminal-set bookkeeping. Returns an undo token consumed by
    /// [`Self::retract`].
    pub fn add_pair(&mut self, v: u32, u: u32) -> AddPairToken {
        debug_assert_eq!(self.core_p[v as usize], NIL);
        debug_assert_eq!(self.core_t[u as usize], NIL);

        // `VF3KSubState::AddPair` (`VF3KSubState.hpp`) only updates the
        // target terminal set while `core_len < limit_level`; past that
        // depth the lookahead counters are frozen and `is_feasible`/
        // `is_dead` stop consulting them (`lookahead_active`). Check this
        // before bumping `depth`, matching the pre-insertion `core_len` the
        // original gates on.
        let lookahead_active = self.lookahead_active();

        self.depth += 1;
        self.core_p[v as usize] = u;
        self.core_t[u as usize] = v;

        let node_c = self.classes.class_t(u) as usize;
        let mut undo = AddPairUndo {
            v,
            u,
            self_entered_in: false,
            self_entered_out: false,
            neighbors_entered_in: Vec::new(),
            neighbors_entered_out: Vec::new(),
        };

        if lookahead_active {
            if self.in_t[u as usize] == 0 {
                self.in_t[u as usize] = self.depth;
                self.t2_in += 1;
                self.t2_in_c[node_c] += 1;
                undo.self_entered_in = true;
                if self.out_t[u as usize] != 0 {
                    self.t2_both += 1;
                    self.t2_both_c[node_c] += 1;
                }
            }
            if self.out_t[u as usize] == 0 {
                self.out_t[u as usize] = self.depth;
                self.t2_out += 1;
                self.t2_out_c[node_c] += 1;
                undo.self_entered_out = true;
                if self.in_t[u as usize] != 0 {
                    self.t2_both += 1;
                    self.t2_both_c[node_c] += 1;
                }
            }

            for &w in self.target.in_neighbors(u) {
                if self.in_t[w as usize] == 0 {
                    let wc = self.classes.class_t(w) as usize;
                    self.in_t[w as usize] = self.depth;
                    self.t2_in += 1;
                    self.t2_in_c[wc] += 1;
                    undo.neighbors_entered_in.push(w);
                    if self.out_t[w as usize] != 0 {
                        self.t2_both += 1;
                        self.t2_both_c[wc] += 1;
                    }
                }
            }
            for &w in self.target.out_neighbors(u) {
                if self.out_t[w as usize] == 0 {
                    let wc = self.classes.class_t(w) as usize;
                    self.out_t[w as usize] = self.depth;
                    self.t2_out += 1;
                    self.t2_out_c[wc] += 1;
                    undo.neighbors_entered_out.push(w);
                    if self.in_t[w as usize] != 0 {
                        self.t2_both += 1;
                        self.t2_both_c[wc] += 1;
                    }
                }
            }
        }

        AddPairToken(undo)
    }

    /// `BackTrack`: undoes exactly the mutation the matching token's
    /// `add_pair` call performed.
    pub fn retract(&mut self, token: AddPairToken) {
        let undo = token.0;
        let node_c = self.classes.class_t(undo.u) as usize;

        for &w in &undo.neighbors_entered_in {
            let wc = self.classes.class_t(w) as usize;
            if self.out_t[w as usize] != 0 {
                self.t2_both_c[wc] -= 1;
                self.t2_both -= 1;
            }
            self.in_t[w as usize] = 0;
            self.t2_in_c[wc] -= 1;
            self.t2_in -= 1;
        }
        for &w in &undo.neighbors_entered_out {
            let wc = self.classes.class_t(w) as usize;
            if self.in_t[w as usize] != 0 {
                self.t2_both_c[wc] -= 1;
                self.t2_both -= 1;
            }
            self.out_t[w as usize] = 0;
            self.t2_out_c[wc] -= 1;
            self.t2_out -= 1;
        }
        if undo.self_entered_out {
            if self.in_t[undo.u as usize] != 0 {
                self.t2_both_c[node_c] -= 1;
                self.t2_both -= 1;
            }
            self.out_t[undo.u as usize] = 0;
            self.t2_out_c[node_c] -= 1;
            self.t2_out -= 1;
        }
        if undo.self_entered_in {
            if self.out_t[undo.u as usize] != 0 {
                self.t2_both_c[node_c] -= 1;
                self.t2_both -= 1;
            }
            self.in_t[undo.u as usize] = 0;
            self.t2_in_c[node_c] -= 1;
            self.t2_in -= 1;
        }

        self.core_p[undo.v as usize] = NIL;
        self.core_t[undo.u as usize] = NIL;
        self.depth -= 1;
    }
}

/// Opaque undo handle returned by [`MatchingState::add_pair`]; must be
/// passed to [`MatchingState::retract`] to backtrack.
pub struct AddPairToken(AddPairUndo);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::vf_text::VfTextSource;
    use crate::probability::UniformProbability;

    fn g(text: &str) -> Arg<i64, i64> {
        Arg::from_source(&VfTextSource::<i64, i64>::parse(text).unwrap()).unwrap()
    }

    fn setup(pattern_text: &str, target_text: &str) -> (Arg<i64, i64>, Arg<i64, i64>) {
        (g(pattern_text), g(target_text))
    }

    #[test]
    fn add_then_retract_restores_all_fields() {
        let (p, t) = setup("1\n0 7\n0\n", "2\n0 3\n1 7\n0\n0\n");
        let classes = NodeClasses::build(&p, &t);
        let prob = UniformProbability::new(t.node_count());
        let order = crate::ordering::build_order(&p, &prob);
        let profile = PatternProfile::build(&p, &order, &classes);
        let mut state = MatchingState::new(&p, &t, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full);

        let before_t2_in = state.t2_in;
        let before_t2_out = state.t2_out;
        let token = state.add_pair(0, 1);
        assert_eq!(state.depth(), 1);
        state.retract(token);
        assert_eq!(state.depth(), 0);
        assert_eq!(state.t2_in, before_t2_in);
        assert_eq!(state.t2_out, before_t2_out);
        assert_eq!(state.core_p, vec![NIL]);
        assert_eq!(state.core_t, vec![NIL; 2]);
    }

    #[test]
    fn single_node_pattern_matches_every_node_with_equal_attribute() {
        let (_p, t) = setup("1\n0 7\n0\n", "3\n0 3\n1 7\n2 7\n0\n0\n0\n");
        // Scenario A from spec.md: single attribute-7 node against three
        // target nodes with attributes 3, 7, 7.
        let p = g("1\n0 7\n0\n");
        let classes = NodeClasses::build(&p, &t);
        let prob = UniformProbability::new(t.node_count());
        let order = crate::ordering::build_order(&p, &prob);
        let profile = PatternProfile::build(&p, &order, &classes);
        let mut state = MatchingState::new(&p, &t, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full);

        let eq_n = |a: &i64, b: &i64| a == b;
        let eq_e = |a: &i64, b: &i64| a == b;
        let mut solutions = Vec::new();
        let mut prev = NIL;
        while let Some(u) = state.next_pair(prev) {
            prev = u;
            if state.is_feasible(0, u, &eq_n, &eq_e) {
                solutions.push(u);
            }
        }
        assert_eq!(solutions, vec![1, 2]);
    }
}
