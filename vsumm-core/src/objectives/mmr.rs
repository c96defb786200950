// ============================================================================
// vsumm-core/src/objectives/mmr.rs
// ============================================================================
//
// MMR: Maximal Marginal Relevance
//
// f(S) = w Σ_{i∈S} r_i - (1 - w) Σ_{i<j ∈ S} k̄[i][j]
//
// r_i is the mean similarity of item i to the whole ground set, so relevant
// items are those representative of the video. Greedy maximization of f picks
// at each step the item maximizing `w r_e - (1 - w) Σ_{i∈S} k̄[i][e]`, which is
// the summed-redundancy form of MMR.
//
// AI-ASSISTANT-INFO: Maximal marginal relevance objective

use super::{pairwise_similarity, symmetric_entry, SetFunction};
use crate::kernel::KernelMatrix;

/// Relevance-minus-redundancy objective blended by `weight`.
#[derive(Debug, Clone)]
pub struct Mmr<'k> {
    kernel: &'k KernelMatrix,
    weight: f64,
    relevance: Vec<f64>,
}

impl<'k> Mmr<'k> {
    pub fn new(kernel: &'k KernelMatrix, weight: f64) -> Self {
        let n = kernel.len().max(1) as f64;
        let relevance = kernel.row_sums().into_iter().map(|s| s / n).collect();
        Self {
            kernel,
            weight,
            relevance,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Mean row similarity of each item.
    pub fn relevance(&self) -> &[f64] {
        &self.relevance
    }
}

impl SetFunction for Mmr<'_> {
    fn name(&self) -> &'static str {
        "maximal marginal relevance"
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
        let relevance: f64 = set.iter().map(|&i| self.relevance[i]).sum();
        self.weight * relevance - (1.0 - self.weight) * pairwise_similarity(self.kernel, set)
    }

    fn empty_cache(&self) -> Vec<f64> {
        vec![0.0; self.kernel.len()]
    }

    fn gain_with_cache(&self, cache: &[f64], item: usize) -> f64 {
        self.weight * self.relevance[item] - (1.0 - self.weight) * cache[item]
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
    fn weight_one_is_pure_relevance() {
        let kernel = sample_kernel();
        let f = Mmr::new(&kernel, 1.0);
        // row 3 sums to 2.7 over five items
        assert!((f.evaluate(&[3]) - 0.54).abs() < 1e-12);
        assert!((f.marginal_gain(3, &[0, 1]) - 0.54).abs() < 1e-12);
    }

    #[test]
    fn weight_zero_matches_disparity() {
        let kernel = sample_kernel();
        let mmr = Mmr::new(&kernel, 0.0);
        let dm = super::super::DisparityMin::new(&kernel);
        for set in [vec![0, 2], vec![1, 3, 4], vec![0, 1, 2, 3, 4]] {
            assert!((mmr.evaluate(&set) - dm.evaluate(&set)).abs() < 1e-12);
        }
    }

    #[test]
    fn redundancy_lowers_gain() {
        let kernel = sample_kernel();
        let f = Mmr::new(&kernel, 0.7);
        assert!(f.marginal_gain(1, &[0]) < f.marginal_gain(1, &[]));
        assert_submodular(&f);
    }
}
