//! End-to-end pipeline tests covering the documented concrete scenarios:
//! build a graph, classify, order, profile, then search with the serial
//! engine and check the resulting solution set.

mod common;

use argiso::classify::NodeClasses;
use argiso::engine::serial_find_all;
use argiso::ordering::build_order;
use argiso::probability::{IsoProbability, SubIsoProbability, TargetStatistics};
use argiso::reject::fast_reject;
use argiso::state::{Induced, Lookahead, MatchingState, PatternProfile, Semantics};
use argiso::Arg;

use common::build;

fn run<N, E>(
    pattern: &Arg<N, E>,
    target: &Arg<N, E>,
    semantics: Semantics,
    induced: Induced,
) -> Vec<Vec<(u32, u32)>>
where
    N: Clone + Eq + std::hash::Hash,
    E: Clone + Eq + std::hash::Hash,
{
    assert!(
        fast_reject(pattern, target, semantics),
        "fast_reject must not reject a pair that actually has solutions"
    );
    let classes = NodeClasses::build(pattern, target);
    let stats = TargetStatistics::build(target);
    let node_eq = |a: &N, b: &N| a == b;
    let edge_eq = |a: &E, b: &E| a == b;

    let solutions = match semantics {
        Semantics::SubIso => {
            let probability = SubIsoProbability::new(&stats);
            let order = build_order(pattern, &probability);
            let profile = PatternProfile::build(pattern, &order, &classes);
            let mut state = MatchingState::new(
                pattern, target, &order, &classes, &profile, induced, semantics, Lookahead::Full,
            );
            serial_find_all(&mut state, &node_eq, &edge_eq, None, None)
        }
        Semantics::Iso => {
            let probability = IsoProbability::new(&stats);
            let order = build_order(pattern, &probability);
            let profile = PatternProfile::build(pattern, &order, &classes);
            let mut state = MatchingState::new(
                pattern, target, &order, &classes, &profile, induced, semantics, Lookahead::Full,
            );
            serial_find_all(&mut state, &node_eq, &edge_eq, None, None)
        }
    };
    solutions
}

/// A) single-node pattern attribute 7 against three target nodes 3,7,7.
#[test]
fn scenario_a_single_node_subiso_has_two_solutions() {
    let pattern = build::<i64, i64>(vec![7], vec![]);
    let target = build::<i64, i64>(vec![3, 7, 7], vec![]);

    let mut solutions = run(&pattern, &target, Semantics::SubIso, false);
    solutions.sort();
    assert_eq!(solutions, vec![vec![(0, 1)], vec![(0, 2)]]);
}

/// B) directed triangle against itself: 3 rotations, 0 reflections.
#[test]
fn scenario_b_directed_triangle_iso_has_three_rotations() {
    let tri = || build::<i64, i64>(vec![1, 1, 1], vec![(0, 1, 1), (1, 2, 1), (2, 0, 1)]);
    let pattern = tri();
    let target = tri();

    let solutions = run(&pattern, &target, Semantics::Iso, true);
    assert_eq!(solutions.len(), 3);

    let mut mapped_0: Vec<u32> = solutions.iter().map(|s| s.iter().find(|(p, _)| *p == 0).unwrap().1).collect();
    mapped_0.sort();
    assert_eq!(mapped_0, vec![0, 1, 2]);
}

/// C) 2-node pattern edge (A,B)/X against a 3-node path A,B,B with edges
/// (X,X): exactly one sub-iso solution, {0->0, 1->1}.
#[test]
fn scenario_c_path_sub_iso_has_one_solution() {
    let pattern = build(vec!["A", "B"], vec![(0u32, 1u32, "X")]);
    let target = build(vec!["A", "B", "B"], vec![(0u32, 1u32, "X"), (1u32, 2u32, "X")]);

    let solutions = run(&pattern, &target, Semantics::SubIso, false);
    assert_eq!(solutions, vec![vec![(0, 0), (1, 1)]]);
}

/// D) a 4-cycle pattern against a 3-cycle target: FastReject rejects on
/// node count alone, before any search.
#[test]
fn scenario_d_larger_pattern_is_fast_rejected() {
    let pattern = build::<i64, i64>(
        vec![0, 0, 0, 0],
        vec![(0, 1, 0), (1, 2, 0), (2, 3, 0), (3, 0, 0)],
    );
    let target = build::<i64, i64>(vec![0, 0, 0], vec![(0, 1, 0), (1, 2, 0), (2, 0, 0)]);

    assert!(!fast_reject(&pattern, &target, Semantics::SubIso));
}

/// E) a pattern attribute absent from the target gets its own unmatchable
/// class; the engine reports zero solutions without enumerating anything.
#[test]
fn scenario_e_unknown_pattern_attribute_yields_no_solutions() {
    let pattern = build::<i64, i64>(vec![99], vec![]);
    let target = build::<i64, i64>(vec![1, 2, 3], vec![]);

    let classes = NodeClasses::build(&pattern, &target);
    assert!(
        classes.is_pattern_only(classes.class_p(0)),
        "an attribute absent from the target must land outside the target's class range"
    );

    let solutions = run(&pattern, &target, Semantics::SubIso, false);
    assert!(solutions.is_empty());
}
