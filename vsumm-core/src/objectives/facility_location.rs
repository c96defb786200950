// ============================================================================
// vsumm-core/src/objectives/facility_location.rs
// ============================================================================
//
// FACILITY LOCATION: Representativeness Objective
//
// f(S) = Σ_j max(0, max_{i∈S} k[i][j])
//
// Every segment j is "served" by its most similar selected segment. The cache
// holds that best similarity per j, so a gain is one pass over a kernel row.
// Clamping at 0 keeps the function monotone and submodular on kernels with
// negative entries.
//
// AI-ASSISTANT-INFO: Facility location objective with best-similarity cache

use super::SetFunction;
use crate::kernel::KernelMatrix;

/// Monotone submodular representativeness objective.
#[derive(Debug, Clone)]
pub struct FacilityLocation<'k> {
    kernel: &'k KernelMatrix,
}

impl<'k> FacilityLocation<'k> {
    pub fn new(kernel: &'k KernelMatrix) -> Self {
        Self { kernel }
    }
}

impl SetFunction for FacilityLocation<'_> {
    fn name(&self) -> &'static str {
        "facility location"
    }

    fn ground_set_size(&self) -> usize {
        self.kernel.len()
    }

    fn is_monotone(&self) -> bool {
        true
    }

    fn evaluate(&self, set: &[usize]) -> f64 {
        (0..self.kernel.len())
            .map(|j| {
                set.iter()
                    .map(|&i| self.kernel.get(i, j))
                    .fold(0.0_f64, f64::max)
            })
            .sum()
    }

    fn empty_cache(&self) -> Vec<f64> {
        vec![0.0; self.kernel.len()]
    }

    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64 {
        self.kernel
            .row(item)
            .iter()
            .zip(cache)
            .map(|(&k, &best)| (k - best).max(0.0))
            .sum()
    }

    fn update_cache(&self, cache: &mut [f64], item: usize) {
        for (best, &k) in cache.iter_mut().zip(self.kernel.row(item)) {
            if k > *best {
                *best = k;
            }
        }
    }
}
