//! Cluster partitioning.
//!
//! Frontier cells sharing a constraint are joined into one cluster;
//! clusters are mutually independent, so the exact search in
//! `search.rs` is bounded by cluster size instead of frontier size.
//! Union-find keeps this iterative regardless of frontier shape.

use crate::solver::frontier::Constraint;
use crate::solver::propagate::PassState;

/// Disjoint-set over frontier indices, with path halving and union by
/// rank.
#[derive(Debug)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// A maximal shared-constraint component of the unresolved frontier.
#[derive(Debug)]
pub(crate) struct Cluster {
    /// Frontier indices, ascending (row-major).
    pub cells: Vec<usize>,
    /// Indices into the reduced constraint list.
    pub constraints: Vec<usize>,
}

/// Group the unresolved frontier cells of `state` by shared-constraint
/// connectivity. Clusters come out ordered by their smallest cell
/// index, cells and constraints in ascending order, so runs are
/// reproducible.
pub(crate) fn partition(frontier_len: usize, state: &PassState) -> Vec<Cluster> {
    let mut sets = DisjointSet::new(frontier_len);
    for constraint in &state.constraints {
        for window in constraint.cells.windows(2) {
            sets.union(window[0], window[1]);
        }
    }

    // Map each root to a dense cluster slot, in ascending cell order.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; frontier_len];
    let mut clusters: Vec<Cluster> = Vec::new();
    for cell in 0..frontier_len {
        if state.verdicts[cell].is_some() {
            continue;
        }
        let root = sets.find(cell);
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            clusters.push(Cluster {
                cells: Vec::new(),
                constraints: Vec::new(),
            });
            clusters.len() - 1
        });
        clusters[slot].cells.push(cell);
    }

    for (idx, constraint) in state.constraints.iter().enumerate() {
        let root = sets.find(constraint.cells[0]);
        if let Some(slot) = slot_of_root[root] {
            clusters[slot].constraints.push(idx);
        }
    }

    clusters
}

/// Cells of `constraints` restricted to one cluster never reference
/// another cluster; `partition` guarantees it by construction.
#[allow(dead_code)]
pub(crate) fn cluster_is_closed(cluster: &Cluster, constraints: &[Constraint]) -> bool {
    cluster
        .constraints
        .iter()
        .all(|&c| constraints[c].cells.iter().all(|cell| cluster.cells.contains(cell)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::solver::frontier::ConstraintSystem;
    use crate::solver::propagate;

    #[test]
    fn test_disjoint_set_unions() {
        let mut sets = DisjointSet::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        assert_eq!(sets.find(0), sets.find(1));
        assert_eq!(sets.find(3), sets.find(4));
        assert_ne!(sets.find(1), sets.find(3));
        sets.union(1, 3);
        assert_eq!(sets.find(0), sets.find(4));
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn test_separated_regions_form_two_clusters() {
        // Two opened 1s far enough apart that their unknown neighbors
        // never co-occur in a constraint.
        let board = Board::from_string(
            "1....1\n\
             ......",
        )
        .unwrap();
        let system = ConstraintSystem::from_board(&board).unwrap();
        let state = propagate::to_fixpoint(&system).unwrap();
        let clusters = partition(system.frontier.len(), &state);
        assert_eq!(clusters.len(), 2);
        for cluster in &clusters {
            assert_eq!(cluster.cells.len(), 3);
            assert_eq!(cluster.constraints.len(), 1);
            assert!(cluster_is_closed(cluster, &state.constraints));
        }
    }

    #[test]
    fn test_overlapping_constraints_merge() {
        // Adjacent opened cells share unknown neighbors: one cluster.
        let board = Board::from_string(
            "11\n\
             ..",
        )
        .unwrap();
        let system = ConstraintSystem::from_board(&board).unwrap();
        let state = propagate::to_fixpoint(&system).unwrap();
        let clusters = partition(system.frontier.len(), &state);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].cells, vec![0, 1]);
        assert_eq!(clusters[0].constraints.len(), 2);
    }

    #[test]
    fn test_resolved_cells_stay_out_of_clusters() {
        let board = Board::from_string(
            "...\n\
             .0.\n\
             ...",
        )
        .unwrap();
        let system = ConstraintSystem::from_board(&board).unwrap();
        let state = propagate::to_fixpoint(&system).unwrap();
        assert!(partition(system.frontier.len(), &state).is_empty());
    }
}
