//! Best-first search core shared by the grid solvers, modelled on
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Nodes live in an insertion-ordered map; a node's predecessor is stored as the index of its
//! parent in that map, so paths are rebuilt by following indices back to the start.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimated cost first; among equals, the node discovered first. A relaxed node
        // keeps its discovery index, so ties resolve the same way however often it is updated.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

fn reverse_path<N, C>(parents: &FxIndexMap<N, (usize, C)>, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents
            .get_index(i)
            .map(|(_, &(parent, _))| parent)
            .filter(|&p| p != NO_PARENT)
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// A* from `start` until `success` accepts an expanded node. Returns the nodes from `start` to
/// that node inclusive, together with the accumulated cost, or [None] once every reachable node
/// has been expanded. Expanded nodes are closed and never reopened, so `heuristic` has to be
/// consistent for the result to be optimal.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (NO_PARENT, Zero::zero()));
    let mut closed: Vec<bool> = vec![false];
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        // A node is pushed again whenever its cost is relaxed; only the first pop counts.
        if closed[index] {
            continue;
        }
        closed[index] = true;
        let successors = {
            let (node, _) = parents.get_index(index)?;
            if success(node) {
                let path = reverse_path(&parents, index);
                return Some((path, cost));
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                    closed.push(false);
                }
                Occupied(mut e) => {
                    if !closed[e.index()] && e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    warn!(
        "Open set exhausted after expanding {} nodes without reaching the goal",
        parents.len()
    );
    None
}
