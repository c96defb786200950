// ============================================================================
// vsumm-core/src/objectives/disparity_min.rs
// ============================================================================
//
// DISPARITY MIN: Diversity Objective
//
// f(S) = -Σ_{i<j ∈ S} k̄[i][j],  k̄[i][j] = (k[i][j] + k[j][i]) / 2
//
// Rewards selections whose members are dissimilar to each other. The cache
// holds each candidate's summed similarity to the current set.
//
// AI-ASSISTANT-INFO: Disparity (pairwise dissimilarity) objective

use super::{pairwise_similarity, symmetric_entry, SetFunction};
use crate::kernel::KernelMatrix;

/// Non-monotone diversity objective. Every singleton scores 0, so greedy
/// runs start from a seed element.
#[derive(Debug, Clone)]
pub struct DisparityMin<'k> {
    kernel: &'k KernelMatrix,
}

impl<'k> DisparityMin<'k> {
    pub fn new(kernel: &'k KernelMatrix) -> Self {
        Self { kernel }
    }
}

impl SetFunction for DisparityMin<'_> {
    fn name(&self) -> &'static str {
        "disparity min"
    }

    fn ground_set_size(&self) -> usize {
        self.kernel.len()
    }

    fn is_monotone(&self) -> bool {
        false
    }

    fn is_submodular(&self) -> bool {
        self.kernel.is_non_negative()
    }

    fn requires_seed(&self) -> bool {
        true
    }

    fn evaluate(&self, set: &[usize]) -> f64 {
        -pairwise_similarity(self.kernel, set)
    }

    fn empty_cache(&self) -> Vec<f64> {
        vec![0.0; self.kernel.len()]
    }

    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64 {
        -cache[item]
    }

    fn update_cache(&self, cache: &mut [f64], item: usize) {
        for (e, slot) in cache.iter_mut().enumerate() {
            *slot += symmetric_entry(self.kernel, item, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objectives::test_support::{assert_submodular, sample_kernel};

    #[test]
    fn prefers_the_least_similar_candidate() {
        let kernel = sample_kernel();
        let f = DisparityMin::new(&kernel);
        assert_eq!(f.evaluate(&[3]), 0.0);
        // from item 0, item 4 has symmetrized similarity 0.0 and item 1 has 0.55
        assert!(f.marginal_gain(4, &[0]) > f.marginal_gain(1, &[0]));
        assert!((f.marginal_gain(1, &[0]) + 0.55).abs() < 1e-12);
    }

    #[test]
    fn is_not_monotone() {
        let kernel = sample_kernel();
        let f = DisparityMin::new(&kernel);
        assert!(!f.is_monotone());
        assert!(f.requires_seed());
        assert!(f.evaluate(&[0, 1]) < f.evaluate(&[0]));
    }

    #[test]
    fn is_submodular_for_non_negative_kernels() {
        let kernel = sample_kernel();
        let f = DisparityMin::new(&kernel);
        assert!(f.is_submodular());
        assert_submodular(&f);
    }

    #[test]
    fn negative_similarities_make_gains_grow() {
        let kernel = KernelMatrix::from_rows(vec![
            vec![1.0, -0.5, 0.3],
            vec![-0.5, 1.0, 0.1],
            vec![0.3, 0.1, 1.0],
        ])
        .unwrap();
        let f = DisparityMin::new(&kernel);
        assert!(!f.is_submodular());
        assert!(f.marginal_gain(1, &[0]) > f.marginal_gain(1, &[]));
    }
}
