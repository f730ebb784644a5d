//! Per-state execution trace, grounded on `include/StateTrace.hpp`. Behind
//! the `trace` feature: records one row per state the engine visits, in the
//! column order of the original
//! (`Id;Parent;Depth;Descendants;Candidates;Goal;Feasible;Leaf`), and
//! implements [`crate::engine::Tracer`] so `engine::serial` and
//! `engine::parallel` can record into it without depending on this module
//! directly.

use std::io::{self, Write};

use crate::engine::{Tracer, ROOT_PARENT};

pub const NULL_TRACE_ID: u64 = u64::MAX;

#[derive(Debug, Clone, Copy)]
struct StateInfo {
    id: u64,
    parent: u64,
    depth: u32,
    descendants: u32,
    candidates: u32,
    goal: bool,
    feasible: bool,
    leaf: bool,
}

impl StateInfo {
    fn write_csv_row<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{};{};{};{};{};{};{};{}",
            self.id,
            self.parent,
            self.depth,
            self.descendants,
            self.candidates,
            self.goal as u8,
            self.feasible as u8,
            self.leaf as u8,
        )
    }
}

/// Accumulates one [`StateInfo`] per call to [`StateTracer::append_candidate`]
/// and writes it out as CSV. Rows are indexed by id, so mutation methods
/// (`mark_goal`, `mark_candidate_seen`) can reach any previously registered
/// row regardless of how deep the search has since recursed.
pub struct StateTracer {
    rows: Vec<StateInfo>,
}

impl Default for StateTracer {
    fn default() -> Self {
        StateTracer { rows: Vec::new() }
    }
}

impl StateTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the state reached by extending `parent` (or
    /// [`NULL_TRACE_ID`]/[`ROOT_PARENT`] for the search root) at `depth`.
    /// Bumps `parent`'s descendant count and clears its leaf flag, since a
    /// row is only ever created for a state the engine actually commits to
    /// (a feasible extension, or the root). Returns the new row's id.
    pub fn append_candidate(&mut self, parent: u64, depth: u32) -> u64 {
        let id = self.rows.len() as u64;
        let is_root = parent == NULL_TRACE_ID || parent == ROOT_PARENT;
        if !is_root {
            if let Some(p) = self.rows.get_mut(parent as usize) {
                p.descendants += 1;
                p.leaf = false;
            }
        }
        self.rows.push(StateInfo {
            id,
            parent,
            depth,
            descendants: 0,
            candidates: 0,
            goal: false,
            feasible: !is_root,
            leaf: true,
        });
        id
    }

    pub fn mark_goal(&mut self, id: u64) {
        if let Some(r) = self.rows.get_mut(id as usize) {
            r.goal = true;
        }
    }

    pub fn mark_candidate_seen(&mut self, id: u64) {
        if let Some(r) = self.rows.get_mut(id as usize) {
            r.candidates += 1;
        }
    }

    /// Writes the header and every accumulated row to `out`.
    pub fn flush_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Id;Parent;Depth;Descendants;Candidates;Goal;Feasible;Leaf")?;
        for row in &self.rows {
            row.write_csv_row(out)?;
        }
        Ok(())
    }
}

impl Tracer for StateTracer {
    fn enter(&mut self, parent: u64, depth: u32) -> u64 {
        self.append_candidate(parent, depth)
    }

    fn candidate_seen(&mut self, id: u64) {
        self.mark_candidate_seen(id)
    }

    fn goal(&mut self, id: u64) {
        self.mark_goal(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_then_goal_produces_two_rows() {
        let mut tracer = StateTracer::new();
        let root = tracer.append_candidate(NULL_TRACE_ID, 0);
        let child = tracer.append_candidate(root, 1);
        assert_ne!(root, child);
        tracer.mark_goal(child);

        let mut buf = Vec::new();
        tracer.flush_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Id;Parent;Depth;Descendants;Candidates;Goal;Feasible;Leaf");
        assert_eq!(lines.len(), 3);
        // child: id=1, parent=0, depth=1, descendants=0, candidates=0, goal=1, feasible=1, leaf=1
        assert_eq!(lines[2], "1;0;1;0;0;1;1;1");
        // root: descendants bumped to 1 and leaf cleared once the child was registered.
        assert_eq!(lines[1], "0;18446744073709551615;0;1;0;0;0;0");
    }

    #[test]
    fn candidates_seen_accumulate_on_the_right_row() {
        let mut tracer = StateTracer::new();
        let root = tracer.append_candidate(NULL_TRACE_ID, 0);
        tracer.mark_candidate_seen(root);
        tracer.mark_candidate_seen(root);
        let child = tracer.append_candidate(root, 1);
        tracer.mark_candidate_seen(child);

        let mut buf = Vec::new();
        tracer.flush_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("0;18446744073709551615;0;1;2;"));
        assert!(lines[2].starts_with("1;0;1;0;1;"));
    }
}
