//! Property tests for the backtrack-idempotence and injectivity invariants,
//! run against small random directed attributed graphs.

mod common;

use argiso::classify::NodeClasses;
use argiso::engine::{parallel_find_all, serial_find_all, ParallelConfig};
use argiso::ordering::build_order;
use argiso::probability::SubIsoProbability;
use argiso::probability::TargetStatistics;
use argiso::state::{Lookahead, MatchingState, PatternProfile, Semantics};
use proptest::prelude::*;

use common::build;

fn small_graph(node_count: u32, edges: &[(u32, u32)]) -> argiso::Arg<u8, u8> {
    let nodes = (0..node_count).map(|i| (i % 3) as u8).collect();
    let edges = edges.iter().map(|&(a, b)| (a, b, 0u8)).collect();
    build(nodes, edges)
}

/// After `add_pair` then `retract` at the same depth, `mapping()` and
/// `depth()` are back to their pre-extend values (invariant 6).
#[test]
fn add_pair_then_retract_restores_mapping_and_depth() {
    let pattern = small_graph(3, &[(0, 1), (1, 2)]);
    let target = small_graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);

    let classes = NodeClasses::build(&pattern, &target);
    let stats = TargetStatistics::build(&target);
    let probability = SubIsoProbability::new(&stats);
    let order = build_order(&pattern, &probability);
    let profile = PatternProfile::build(&pattern, &order, &classes);

    let mut state = MatchingState::new(
        &pattern, &target, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full,
    );

    let before_depth = state.depth();
    let before_mapping = state.mapping();

    let v = state.sigma_at_current_depth();
    let mut prev = argiso::graph::NIL;
    let node_eq = |a: &u8, b: &u8| a == b;
    let edge_eq = |a: &u8, b: &u8| a == b;
    while let Some(u) = state.next_pair(prev) {
        prev = u;
        if state.is_feasible(v, u, &node_eq, &edge_eq) {
            let token = state.add_pair(v, u);
            assert_ne!(state.depth(), before_depth);
            state.retract(token);
            assert_eq!(state.depth(), before_depth);
            assert_eq!(state.mapping(), before_mapping);
        }
    }
}

/// Every solution returned is an injective partial mapping: no pattern node
/// or target node appears twice (invariant 3).
#[test]
fn every_solution_is_an_injective_mapping() {
    let pattern = small_graph(3, &[(0, 1), (1, 2)]);
    let target = small_graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);

    let classes = NodeClasses::build(&pattern, &target);
    let stats = TargetStatistics::build(&target);
    let probability = SubIsoProbability::new(&stats);
    let order = build_order(&pattern, &probability);
    let profile = PatternProfile::build(&pattern, &order, &classes);

    let mut state = MatchingState::new(
        &pattern, &target, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full,
    );
    let node_eq = |a: &u8, b: &u8| a == b;
    let edge_eq = |a: &u8, b: &u8| a == b;
    let solutions = serial_find_all(&mut state, &node_eq, &edge_eq, None, None);

    assert!(!solutions.is_empty());
    for sol in &solutions {
        let mut pattern_nodes: Vec<u32> = sol.iter().map(|(p, _)| *p).collect();
        let mut target_nodes: Vec<u32> = sol.iter().map(|(_, t)| *t).collect();
        pattern_nodes.sort();
        pattern_nodes.dedup();
        target_nodes.sort();
        target_nodes.dedup();
        assert_eq!(pattern_nodes.len(), sol.len());
        assert_eq!(target_nodes.len(), sol.len());
    }
}

/// F) the parallel engine's solution multiset matches the serial engine's
/// across repeated runs on a modest random target (invariant 8).
#[test]
fn scenario_f_parallel_and_serial_agree_on_solution_count() {
    let pattern = small_graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
    let mut edges = Vec::new();
    for i in 0..100u32 {
        edges.push((i, (i + 1) % 100));
        edges.push((i, (i + 7) % 100));
    }
    let target = small_graph(100, &edges);

    let classes = NodeClasses::build(&pattern, &target);
    let stats = TargetStatistics::build(&target);
    let probability = SubIsoProbability::new(&stats);
    let order = build_order(&pattern, &probability);
    let profile = PatternProfile::build(&pattern, &order, &classes);
    let node_eq = |a: &u8, b: &u8| a == b;
    let edge_eq = |a: &u8, b: &u8| a == b;

    let mut serial_state = MatchingState::new(
        &pattern, &target, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full,
    );
    let serial_solutions = serial_find_all(&mut serial_state, &node_eq, &edge_eq, None, None);

    for _ in 0..10 {
        let parallel_state = MatchingState::new(
            &pattern, &target, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full,
        );
        let config = ParallelConfig::new(4, pattern.node_count());
        let (count, _solutions) = parallel_find_all(parallel_state, &node_eq, &edge_eq, &config, None, None);
        assert_eq!(count, serial_solutions.len());
    }
}

proptest! {
    /// Backtrack idempotence holds for any feasible extension found on a
    /// randomly generated small cyclic pattern/target pair.
    #[test]
    fn backtrack_idempotence_holds_for_random_small_cycles(
        pattern_len in 2u32..5,
        target_len in 5u32..12,
    ) {
        let pattern_edges: Vec<(u32, u32)> = (0..pattern_len)
            .map(|i| (i, (i + 1) % pattern_len))
            .collect();
        let target_edges: Vec<(u32, u32)> = (0..target_len)
            .map(|i| (i, (i + 1) % target_len))
            .collect();
        let pattern = small_graph(pattern_len, &pattern_edges);
        let target = small_graph(target_len, &target_edges);

        let classes = NodeClasses::build(&pattern, &target);
        let stats = TargetStatistics::build(&target);
        let probability = SubIsoProbability::new(&stats);
        let order = build_order(&pattern, &probability);
        let profile = PatternProfile::build(&pattern, &order, &classes);

        let mut state = MatchingState::new(
            &pattern, &target, &order, &classes, &profile, false, Semantics::SubIso, Lookahead::Full,
        );
        let node_eq = |a: &u8, b: &u8| a == b;
        let edge_eq = |a: &u8, b: &u8| a == b;

        let before_depth = state.depth();
        let before_mapping = state.mapping();
        let v = state.sigma_at_current_depth();
        let mut prev = argiso::graph::NIL;
        while let Some(u) = state.next_pair(prev) {
            prev = u;
            if state.is_feasible(v, u, &node_eq, &edge_eq) {
                let token = state.add_pair(v, u);
                state.retract(token);
                prop_assert_eq!(state.depth(), before_depth);
                prop_assert_eq!(state.mapping(), before_mapping.clone());
            }
        }
    }
}
