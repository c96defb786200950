// ============================================================================
// vsumm-core/src/objectives/graph_cut.rs
// ============================================================================
//
// GRAPH CUT: Coverage Minus Internal Redundancy
//
// f(S) = Σ_{i∈S} Σ_{j∈V} k[i][j] - λ Σ_{i∈S} Σ_{j∈S} k[i][j]
//
// The cache holds, per candidate e, Σ_{i∈S} (k[i][e] + k[e][i]), which is the
// amount the penalty grows by when e joins, excluding e's own diagonal.
//
// AI-ASSISTANT-INFO: Graph cut objective with similarity-to-set cache

use super::SetFunction;
use crate::kernel::KernelMatrix;

/// Coverage objective with a redundancy penalty `lambda`.
///
/// Submodular for non-negative kernels; monotone when the kernel is also
/// symmetric and `lambda <= 0.5`.
#[derive(Debug, Clone)]
pub struct GraphCut<'k> {
    kernel: &'k KernelMatrix,
    lambda: f64,
    row_sums: Vec<f64>,
    non_negative: bool,
    symmetric: bool,
}

impl<'k> GraphCut<'k> {
    pub fn new(kernel: &'k KernelMatrix, lambda: f64) -> Self {
        Self {
            kernel,
            lambda,
            row_sums: kernel.row_sums(),
            non_negative: kernel.is_non_negative(),
            symmetric: kernel.is_symmetric(1e-12),
        }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl SetFunction for GraphCut<'_> {
    fn name(&self) -> &'static str {
        "graph cut"
    }

    fn ground_set_size(&self) -> usize {
        self.kernel.len()
    }

    fn is_monotone(&self) -> bool {
        self.lambda <= 0.5 && self.non_negative && self.symmetric
    }

    fn is_submodular(&self) -> bool {
        self.non_negative
    }

    fn evaluate(&self, set: &[usize]) -> f64 {
        let coverage: f64 = set.iter().map(|&i| self.row_sums[i]).sum();
        let redundancy: f64 = set
            .iter()
            .map(|&i| set.iter().map(|&j| self.kernel.get(i, j)).sum::<f64>())
            .sum();
        coverage - self.lambda * redundancy
    }

    fn empty_cache(&self) -> Vec<f64> {
        vec![0.0; self.kernel.len()]
    }

    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64 {
        self.row_sums[item] - self.lambda * (cache[item] + self.kernel.get(item, item))
    }

    fn update_cache(&self, cache: &mut [f64], item: usize) {
        let row = self.kernel.row(item);
        for (e, slot) in cache.iter_mut().enumerate() {
            *slot += row[e] + self.kernel.get(e, item);
        }
    }
}
