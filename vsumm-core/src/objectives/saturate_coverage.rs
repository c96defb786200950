// ============================================================================
// vsumm-core/src/objectives/saturate_coverage.rs
// ============================================================================
//
// SATURATED COVERAGE: Coverage with Per-Item Saturation
//
// f(S) = Σ_j min(Σ_{i∈S} k[i][j], α Σ_{i∈V} k[i][j])
//
// Once item j is covered up to a fraction α of its total similarity mass,
// further coverage of j earns nothing. The cache holds the raw coverage sum
// per item; the caps are computed once from the column sums.
//
// AI-ASSISTANT-INFO: Saturated coverage objective with coverage-sum cache

use super::SetFunction;
use crate::kernel::KernelMatrix;

/// Coverage objective that is monotone and submodular only on non-negative
/// kernels. Negative similarities can push caps and singleton gains below
/// zero.
#[derive(Debug, Clone)]
pub struct SaturateCoverage<'k> {
    kernel: &'k KernelMatrix,
    alpha: f64,
    caps: Vec<f64>,
    non_negative: bool,
}

impl<'k> SaturateCoverage<'k> {
    pub fn new(kernel: &'k KernelMatrix, alpha: f64) -> Self {
        let caps = kernel.column_sums().into_iter().map(|s| alpha * s).collect();
        Self {
            kernel,
            alpha,
            caps,
            non_negative: kernel.is_non_negative(),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Saturation cap `α Σ_{i∈V} k[i][j]` for each item j.
    pub fn caps(&self) -> &[f64] {
        &self.caps
    }
}

impl SetFunction for SaturateCoverage<'_> {
    fn name(&self) -> &'static str {
        "saturated coverage"
    }

    fn ground_set_size(&self) -> usize {
        self.kernel.len()
    }

    fn is_monotone(&self) -> bool {
        self.non_negative
    }

    fn is_submodular(&self) -> bool {
        self.non_negative
    }

    fn evaluate(&self, set: &[usize]) -> f64 {
        self.caps
            .iter()
            .enumerate()
            .map(|(j, &cap)| {
                let covered: f64 = set.iter().map(|&i| self.kernel.get(i, j)).sum();
                covered.min(cap)
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
            .zip(&self.caps)
            .map(|((&k, &covered), &cap)| (covered + k).min(cap) - covered.min(cap))
            .sum()
    }

    fn update_cache(&self, cache: &mut [f64], item: usize) {
        for (covered, &k) in cache.iter_mut().zip(self.kernel.row(item)) {
            *covered += k;
        }
    }
}
