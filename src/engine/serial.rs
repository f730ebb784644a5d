//! Single-threaded depth-first search, a direct transcription of
//! `MatchingEngine::FindFirstMatching`/`FindAllMatchings`.

use crate::graph::NIL;
use crate::state::MatchingState;

use super::{MatchingVisitor, Solution, Tracer, ROOT_PARENT};

/// Depth-first search for one solution. Returns as soon as a goal state is
/// reached; `state` is left in an arbitrary (non-goal) configuration.
/// `tracer`, when present, records one row per state visited (see
/// [`crate::trace::StateTracer`], behind the `trace` feature).
pub fn serial_find_first<N, EP, ET, NE, EE>(
    state: &mut MatchingState<'_, N, EP, ET>,
    node_eq: &NE,
    edge_eq: &EE,
    mut tracer: Option<&mut dyn Tracer>,
) -> Option<Solution>
where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    let root_id = tracer.as_deref_mut().map(|t| t.enter(ROOT_PARENT, state.depth()));
    find_first_inner(state, node_eq, edge_eq, &mut tracer, root_id)
}

fn find_first_inner<N, EP, ET, NE, EE>(
    state: &mut MatchingState<'_, N, EP, ET>,
    node_eq: &NE,
    edge_eq: &EE,
    tracer: &mut Option<&mut dyn Tracer>,
    id: Option<u64>,
) -> Option<Solution>
where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    if state.is_goal() {
        if let (Some(t), Some(id)) = (tracer.as_deref_mut(), id) {
            t.goal(id);
        }
        return Some(state.mapping());
    }
    if state.is_dead() {
        return None;
    }

    let mut prev = NIL;
    while let Some(u) = state.next_pair(prev) {
        prev = u;
        let v = state.sigma_at_current_depth();
        if let (Some(t), Some(id)) = (tracer.as_deref_mut(), id) {
            t.candidate_seen(id);
        }
        if state.is_feasible(v, u, node_eq, edge_eq) {
            let child_id = match (tracer.as_deref_mut(), id) {
                (Some(t), Some(id)) => Some(t.enter(id, state.depth() + 1)),
                _ => None,
            };
            let token = state.add_pair(v, u);
            let found = find_first_inner(state, node_eq, edge_eq, tracer, child_id);
            if found.is_some() {
                return found;
            }
            state.retract(token);
        }
    }
    None
}

/// Depth-first search enumerating every solution. Counts and optionally
/// collects every goal state reached; stops early only if `visitor` returns
/// `true`. `tracer`, when present, records one row per state visited (see
/// [`crate::trace::StateTracer`], behind the `trace` feature).
pub fn serial_find_all<N, EP, ET, NE, EE>(
    state: &mut MatchingState<'_, N, EP, ET>,
    node_eq: &NE,
    edge_eq: &EE,
    mut visitor: Option<&mut dyn MatchingVisitor>,
    mut tracer: Option<&mut dyn Tracer>,
) -> Vec<Solution>
where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    let mut solutions = Vec::new();
    let root_id = tracer.as_deref_mut().map(|t| t.enter(ROOT_PARENT, state.depth()));
    find_all_inner(state, node_eq, edge_eq, &mut visitor, &mut tracer, root_id, &mut solutions);
    solutions
}

#[allow(clippy::too_many_arguments)]
fn find_all_inner<N, EP, ET, NE, EE>(
    state: &mut MatchingState<'_, N, EP, ET>,
    node_eq: &NE,
    edge_eq: &EE,
    visitor: &mut Option<&mut dyn MatchingVisitor>,
    tracer: &mut Option<&mut dyn Tracer>,
    id: Option<u64>,
    solutions: &mut Vec<Solution>,
) -> bool
where
    N: Eq,
    EP: Eq,
    ET: Eq,
    NE: Fn(&N, &N) -> bool,
    EE: Fn(&EP, &ET) -> bool,
{
    if state.is_goal() {
        if let (Some(t), Some(id)) = (tracer.as_deref_mut(), id) {
            t.goal(id);
        }
        let sol = state.mapping();
        let stop = visitor.as_deref_mut().map(|v| v.visit(&sol)).unwrap_or(false);
        solutions.push(sol);
        return stop;
    }
    if state.is_dead() {
        return false;
    }

    let mut prev = NIL;
    while let Some(u) = state.next_pair(prev) {
        prev = u;
        let v = state.sigma_at_current_depth();
        if let (Some(t), Some(id)) = (tracer.as_deref_mut(), id) {
            t.candidate_seen(id);
        }
        if state.is_feasible(v, u, node_eq, edge_eq) {
            let child_id = match (tracer.as_deref_mut(), id) {
                (Some(t), Some(id)) => Some(t.enter(id, state.depth() + 1)),
                _ => None,
            };
            let token = state.add_pair(v, u);
            let stop = find_all_inner(state, node_eq, edge_eq, visitor, tracer, child_id, solutions);
            state.retract(token);
            if stop {
                return true;
            }
        }
    }
    false
}
