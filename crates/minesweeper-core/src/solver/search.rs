//! Exact per-cluster enumeration.
//!
//! Depth-first search over the cluster's cells in ascending frontier
//! index (row-major), with an explicit partial assignment. A branch is
//! cut as soon as any constraint holds more mines than its target, or
//! can no longer reach it with the cells still unassigned. Every
//! surviving full assignment is folded into two running intersections:
//! cells that are mines in all of them, and cells that are safe in all
//! of them. Only those intersections yield verdicts; everything else is
//! genuinely ambiguous. The search is exact, with no branch cap.

use std::collections::HashMap;

use tracing::trace;

use crate::board::Position;
use crate::error::SolveError;
use crate::solver::cluster::Cluster;
use crate::solver::propagate::PassState;
use crate::solver::types::Verdict;

/// Running tally for one constraint during the search.
#[derive(Debug)]
struct Tally {
    target: usize,
    placed: usize,
    unassigned: usize,
}

struct Search {
    /// Constraint slots each local variable participates in.
    members: Vec<Vec<usize>>,
    tallies: Vec<Tally>,
    assignment: Vec<bool>,
    always_mine: Vec<bool>,
    always_safe: Vec<bool>,
    survivors: u64,
}

impl Search {
    /// Commit `var = value` to every affected tally. Returns whether
    /// all of them remain satisfiable.
    fn apply(&mut self, var: usize, value: bool) -> bool {
        let mut feasible = true;
        for &slot in &self.members[var] {
            let tally = &mut self.tallies[slot];
            tally.unassigned -= 1;
            if value {
                tally.placed += 1;
            }
            if tally.placed > tally.target || tally.placed + tally.unassigned < tally.target {
                feasible = false;
            }
        }
        feasible
    }

    fn retract(&mut self, var: usize, value: bool) {
        for &slot in &self.members[var] {
            let tally = &mut self.tallies[slot];
            tally.unassigned += 1;
            if value {
                tally.placed -= 1;
            }
        }
    }

    fn dfs(&mut self, var: usize) {
        if var == self.assignment.len() {
            self.survivors += 1;
            for (cell, &mined) in self.assignment.iter().enumerate() {
                if mined {
                    self.always_safe[cell] = false;
                } else {
                    self.always_mine[cell] = false;
                }
            }
            return;
        }
        for value in [false, true] {
            self.assignment[var] = value;
            if self.apply(var, value) {
                self.dfs(var + 1);
            }
            self.retract(var, value);
        }
    }
}

/// Enumerate every assignment satisfying the cluster's constraints and
/// record the forced cells in `state`. Zero surviving assignments means
/// the snapshot itself is contradictory.
pub(crate) fn solve_cluster(
    frontier: &[Position],
    state: &mut PassState,
    cluster: &Cluster,
) -> Result<(), SolveError> {
    let n = cluster.cells.len();
    let local: HashMap<usize, usize> = cluster
        .cells
        .iter()
        .enumerate()
        .map(|(k, &cell)| (cell, k))
        .collect();

    let mut members = vec![Vec::new(); n];
    let mut tallies = Vec::with_capacity(cluster.constraints.len());
    for (slot, &ci) in cluster.constraints.iter().enumerate() {
        let constraint = &state.constraints[ci];
        for cell in &constraint.cells {
            members[local[cell]].push(slot);
        }
        tallies.push(Tally {
            target: constraint.mines,
            placed: 0,
            unassigned: constraint.cells.len(),
        });
    }

    let mut search = Search {
        members,
        tallies,
        assignment: vec![false; n],
        always_mine: vec![true; n],
        always_safe: vec![true; n],
        survivors: 0,
    };
    search.dfs(0);
    trace!(
        cells = n,
        constraints = cluster.constraints.len(),
        survivors = search.survivors,
        "cluster enumerated"
    );

    if search.survivors == 0 {
        return Err(SolveError::NoConsistentAssignment { cells: n });
    }

    for (k, &cell) in cluster.cells.iter().enumerate() {
        if search.always_mine[k] {
            state.assign(frontier, cell, Verdict::Mine)?;
        } else if search.always_safe[k] {
            state.assign(frontier, cell, Verdict::Safe)?;
        }
    }
    Ok(())
}
