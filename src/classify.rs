//! Node classification by attribute equivalence, grounded on
//! `include/NodeClassifier.hpp`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::Arg;

/// Assigns dense class ids to node attributes. A single pass over the
/// target assigns ids `0..C_T`; the pattern's attributes reuse those ids
/// and any attribute absent from the target gets a fresh id `>= C_T`,
/// which — per spec §4.3 — can then never satisfy a class-equality
/// feasibility check.
pub struct NodeClasses {
    class_p: Vec<u32>,
    class_t: Vec<u32>,
    classes_count: u32,
    /// Number of classes that actually occur in the target (`C_T`); classes
    /// at or beyond this id are pattern-only and unmatchable.
    target_classes_count: u32,
}

impl NodeClasses {
    pub fn build<N, EP, ET>(pattern: &Arg<N, EP>, target: &Arg<N, ET>) -> Self
    where
        N: Clone + Eq + Hash,
    {
        let mut map: HashMap<N, u32> = HashMap::new();
        let mut class_t = Vec::with_capacity(target.node_count() as usize);
        for u in 0..target.node_count() {
            let attr = target.node_attr(u).clone();
            let next = map.len() as u32;
            let id = *map.entry(attr).or_insert(next);
            class_t.push(id);
        }
        let target_classes_count = map.len() as u32;

        let mut class_p = Vec::with_capacity(pattern.node_count() as usize);
        for v in 0..pattern.node_count() {
            let attr = pattern.node_attr(v).clone();
            let next = map.len() as u32;
            let id = *map.entry(attr).or_insert(next);
            class_p.push(id);
        }

        NodeClasses {
            class_p,
            class_t,
            classes_count: map.len() as u32,
            target_classes_count,
        }
    }

    pub fn class_p(&self, v: u32) -> u32 {
        self.class_p[v as usize]
    }

    pub fn class_t(&self, u: u32) -> u32 {
        self.class_t[u as usize]
    }

    pub fn classes_count(&self) -> u32 {
        self.classes_count
    }

    pub fn target_classes_count(&self) -> u32 {
        self.target_classes_count
    }

    /// True when `class_p(v)` cannot possibly occur in the target, i.e. the
    /// pattern uses an attribute the target never does (scenario E).
    pub fn is_pattern_only(&self, class: u32) -> bool {
        class >= self.target_classes_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::vf_text::VfTextSource;

    fn g(text: &str) -> Arg<i64, i64> {
        Arg::from_source(&VfTextSource::<i64, i64>::parse(text).unwrap()).unwrap()
    }

    #[test]
    fn attribute_absent_from_target_gets_fresh_unmatchable_class() {
        let t = g("1\n0 3\n0\n");
        let p = g("1\n0 7\n0\n");
        let classes = NodeClasses::build(&p, &t);
        assert!(classes.is_pattern_only(classes.class_p(0)));
        assert_eq!(classes.classes_count(), 2);
        assert_eq!(classes.target_classes_count(), 1);
    }

    #[test]
    fn shared_attribute_reuses_target_class() {
        let t = g("1\n0 7\n0\n");
        let p = g("1\n0 7\n0\n");
        let classes = NodeClasses::build(&p, &t);
        assert!(!classes.is_pattern_only(classes.class_p(0)));
        assert_eq!(classes.class_p(0), classes.class_t(0));
    }
}
