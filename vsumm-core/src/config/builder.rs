// ============================================================================
// vsumm-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for SummarizerConfig
//
// This module implements the builder pattern for the SummarizerConfig
// structure, providing a fluent API with defaults for every field and
// validation of the hyperparameter ranges at build time.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for SummarizerConfig

// ---- Internal crate imports ----
use super::SummarizerConfig;
use crate::error::CoreResult;
use crate::kernel::SimilarityMeasure;
use crate::objectives::ObjectiveKind;

/// Builder for creating SummarizerConfig instances.
///
/// # Examples
///
/// ```rust
/// use vsumm_core::config::SummarizerConfigBuilder;
/// use vsumm_core::kernel::SimilarityMeasure;
/// use vsumm_core::objectives::ObjectiveKind;
///
/// let config = SummarizerConfigBuilder::new()
///     .objective(ObjectiveKind::SaturateCoverage)
///     .similarity(SimilarityMeasure::Gaussian { sigma: 0.5 })
///     .saturation_alpha(0.2)
///     .build()
///     .unwrap();
/// assert_eq!(config.saturation_alpha, 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl Default for SummarizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SummarizerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: SummarizerConfig::default(),
        }
    }

    /// Sets the objective function.
    pub fn objective(mut self, objective: ObjectiveKind) -> Self {
        self.config.objective = objective;
        self
    }

    /// Sets the similarity measure used for the kernel.
    pub fn similarity(mut self, similarity: SimilarityMeasure) -> Self {
        self.config.similarity = similarity;
        self
    }

    /// Sets the MMR relevance weight.
    ///
    /// # Arguments
    ///
    /// * `weight` - 0 favours diversity only, 1 favours relevance only
    pub fn mmr_relevance_weight(mut self, weight: f64) -> Self {
        self.config.mmr_relevance_weight = weight;
        self
    }

    /// Sets the graph cut redundancy penalty.
    ///
    /// # Arguments
    ///
    /// * `lambda` - Penalty on internal similarity; monotone up to 0.5
    pub fn graph_cut_lambda(mut self, lambda: f64) -> Self {
        self.config.graph_cut_lambda = lambda;
        self
    }

    /// Sets the saturation fraction of the saturated coverage objective.
    pub fn saturation_alpha(mut self, alpha: f64) -> Self {
        self.config.saturation_alpha = alpha;
        self
    }

    /// Sets the seed used to draw the initial item.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Pins the initial item instead of drawing it from the seed.
    pub fn initial_item(mut self, item: usize) -> Self {
        self.config.initial_item = Some(item);
        self
    }

    /// Enables or disables parallel kernel construction.
    pub fn parallel_kernel(mut self, parallel: bool) -> Self {
        self.config.parallel_kernel = parallel;
        self
    }

    /// Enables or disables forcing the first and last segments into
    /// streaming summaries.
    pub fn force_stream_endpoints(mut self, force: bool) -> Self {
        self.config.force_stream_endpoints = force;
        self
    }

    /// Builds the configuration, validating all hyperparameters.
    ///
    /// # Returns
    ///
    /// * `Ok(SummarizerConfig)` - If every value is in range
    /// * `Err(CoreError::InvalidConfig)` - Otherwise
    pub fn build(self) -> CoreResult<SummarizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
