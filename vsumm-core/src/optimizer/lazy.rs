// ============================================================================
// vsumm-core/src/optimizer/lazy.rs
// ============================================================================
//
// LAZY GREEDY: Priority Queue of Stale Upper Bounds
//
// Submodularity makes a gain computed against an earlier, smaller set an
// upper bound on the current gain. The queue keeps each candidate keyed by its
// last computed gain per cost and only recomputes the top entry; if the
// refreshed value still beats every other bound, it is the true maximum.
// Heap order is (ratio, lower index first), which reproduces the naive
// greedy's lowest-index tie-break exactly. Objectives that do not report
// diminishing returns (GraphCut or SaturateCoverage over a kernel with negative
// entries) are handed to the naive scan instead.
//
// AI-ASSISTANT-INFO: Lazy greedy knapsack maximization and shared lazy queue

use log::{debug, info, trace, warn};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{
    apply_seeds, check_empty_selection, naive_greedy_max_knapsack, validate_budget,
    validate_costs, validate_items, SelectionResult,
};
use crate::error::CoreResult;
use crate::objectives::{SelectionState, SetFunction};

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    ratio: f64,
    item: usize,
    /// Selection size at the time `ratio` was computed
    version: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio
            .total_cmp(&other.ratio)
            .then_with(|| other.item.cmp(&self.item))
    }
}

/// Max-queue of candidates keyed by possibly stale gain-per-cost bounds.
#[derive(Debug)]
pub(crate) struct LazyQueue {
    heap: BinaryHeap<HeapEntry>,
    evaluations: usize,
}

impl LazyQueue {
    /// Queues every item not yet in `state` with its exact current ratio.
    pub(crate) fn new<F: SetFunction + ?Sized>(f: &F, state: &SelectionState, costs: &[f64]) -> Self {
        let version = state.len();
        let heap: BinaryHeap<HeapEntry> = (0..f.ground_set_size())
            .filter(|&item| !state.contains(item))
            .map(|item| HeapEntry {
                ratio: state.gain(f, item) / costs[item],
                item,
                version,
            })
            .collect();
        let evaluations = heap.len();
        Self { heap, evaluations }
    }

    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Pops the candidate with the largest current gain per cost among those
    /// satisfying `fits`. Candidates failing `fits` are discarded for good,
    /// so the predicate must only ever become stricter between calls.
    pub(crate) fn next_best<F, P>(
        &mut self,
        f: &F,
        state: &SelectionState,
        costs: &[f64],
        fits: P,
    ) -> Option<(usize, f64)>
    where
        F: SetFunction + ?Sized,
        P: Fn(usize) -> bool,
    {
        while let Some(entry) = self.heap.pop() {
            if state.contains(entry.item) || !fits(entry.item) {
                continue;
            }
            if entry.version == state.len() {
                return Some((entry.item, entry.ratio));
            }

            let refreshed = HeapEntry {
                ratio: state.gain(f, entry.item) / costs[entry.item],
                item: entry.item,
                version: state.len(),
            };
            self.evaluations += 1;
            trace!(
                "Lazy refresh of segment {}: bound {:.4} -> {:.4}",
                entry.item, entry.ratio, refreshed.ratio
            );

            match self.heap.peek() {
                Some(next) if *next > refreshed => self.heap.push(refreshed),
                _ => return Some((refreshed.item, refreshed.ratio)),
            }
        }
        None
    }
}

/// Lazy variant of [`super::naive_greedy_max_knapsack`].
///
/// Returns the same selection as the naive greedy, usually with far fewer
/// gain evaluations. When `f.is_submodular()` is false the stale bounds are
/// not upper bounds, so the naive greedy runs instead.
pub fn lazy_greedy_max_knapsack<F: SetFunction + ?Sized>(
    f: &F,
    costs: &[f64],
    budget: f64,
    initial: &[usize],
) -> CoreResult<SelectionResult> {
    if !f.is_submodular() {
        warn!(
            "{} is not submodular on this kernel; using the naive greedy",
            f.name()
        );
        return naive_greedy_max_knapsack(f, costs, budget, initial);
    }
    validate_costs(f, costs)?;
    validate_budget(budget)?;
    let n = f.ground_set_size();
    validate_items(n, initial, "seed")?;

    let mut state = SelectionState::new(f);
    let mut warnings = Vec::new();
    let mut spent = apply_seeds(f, &mut state, costs, budget, initial, &mut warnings);
    let mut queue = LazyQueue::new(f, &state, costs);

    while let Some((item, ratio)) = queue.next_best(f, &state, costs, |i| spent + costs[i] <= budget) {
        let gain = state.insert(f, item);
        spent += costs[item];
        debug!(
            "Lazy greedy round {}: added segment {} (gain {:.4}, gain/cost {:.4}, spent {:.3}/{:.3})",
            state.len(),
            item,
            gain,
            ratio,
            spent,
            budget
        );
    }

    check_empty_selection(&state, costs, budget, &mut warnings);
    info!(
        "Lazy greedy ({}) selected {} of {} segments, value {:.4}, {} evaluations",
        f.name(),
        state.len(),
        n,
        state.value(),
        queue.evaluations()
    );
    Ok(SelectionResult::from_state(&state, costs, queue.evaluations(), warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{build_kernel, SimilarityMeasure};
    use crate::objectives::{FacilityLocation, GraphCut, SaturateCoverage};
    use crate::optimizer::test_support::clustered_kernel;

    #[test]
    fn heap_prefers_lower_index_on_equal_ratio() {
        let a = HeapEntry { ratio: 1.0, item: 2, version: 0 };
        let b = HeapEntry { ratio: 1.0, item: 5, version: 0 };
        assert!(a > b);
        let mut heap = BinaryHeap::from(vec![b, a]);
        assert_eq!(heap.pop().map(|e| e.item), Some(2));
    }

    #[test]
    fn matches_naive_greedy() {
        let kernel = clustered_kernel();
        let costs = [1.0, 0.5, 2.0, 1.5, 0.8, 1.2];
        let fl = FacilityLocation::new(&kernel);
        let gc = GraphCut::new(&kernel, 0.5);
        let sc = SaturateCoverage::new(&kernel, 0.2);
        for budget in [0.5, 1.3, 2.5, 4.0, 100.0] {
            let lazy = lazy_greedy_max_knapsack(&fl, &costs, budget, &[]).unwrap();
            let naive = naive_greedy_max_knapsack(&fl, &costs, budget, &[]).unwrap();
            assert_eq!(lazy.selected, naive.selected);

            let lazy = lazy_greedy_max_knapsack(&gc, &costs, budget, &[]).unwrap();
            let naive = naive_greedy_max_knapsack(&gc, &costs, budget, &[]).unwrap();
            assert_eq!(lazy.selected, naive.selected);

            let lazy = lazy_greedy_max_knapsack(&sc, &costs, budget, &[]).unwrap();
            let naive = naive_greedy_max_knapsack(&sc, &costs, budget, &[]).unwrap();
            assert_eq!(lazy.selected, naive.selected);
        }
    }

    #[test]
    fn falls_back_to_naive_scan_on_negative_kernels() {
        let features = vec![
            vec![1.0, 0.2, -0.4],
            vec![-0.9, 0.3, 0.1],
            vec![0.2, -1.0, 0.5],
            vec![0.4, 0.6, 0.8],
            vec![-0.3, -0.7, -0.2],
            vec![0.9, -0.1, -0.6],
        ];
        let kernel = build_kernel(&features, SimilarityMeasure::Cosine, false).unwrap();
        assert!(!kernel.is_non_negative());
        let gc = GraphCut::new(&kernel, 0.5);
        let sc = SaturateCoverage::new(&kernel, 0.3);
        assert!(!gc.is_submodular());
        assert!(!sc.is_submodular());

        for budget in [1.0, 2.0, 4.0] {
            let lazy = lazy_greedy_max_knapsack(&gc, &[1.0; 6], budget, &[]).unwrap();
            let naive = naive_greedy_max_knapsack(&gc, &[1.0; 6], budget, &[]).unwrap();
            assert_eq!(lazy, naive);

            let lazy = lazy_greedy_max_knapsack(&sc, &[1.0; 6], budget, &[]).unwrap();
            let naive = naive_greedy_max_knapsack(&sc, &[1.0; 6], budget, &[]).unwrap();
            assert_eq!(lazy, naive);
        }
    }

    #[test]
    fn uses_fewer_evaluations_than_naive() {
        let kernel = clustered_kernel();
        let fl = FacilityLocation::new(&kernel);
        let lazy = lazy_greedy_max_knapsack(&fl, &[1.0; 6], 6.0, &[]).unwrap();
        let naive = naive_greedy_max_knapsack(&fl, &[1.0; 6], 6.0, &[]).unwrap();
        assert_eq!(lazy.len(), 6);
        assert!(lazy.evaluations <= naive.evaluations);
    }
}
