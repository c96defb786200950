//! Configuration structures and constants for the vsumm-core library.
//!
//! This module provides the configuration system for a summarization run:
//! how the timeline is segmented and costed, which similarity measure builds
//! the kernel, and which objective (with its hyperparameters) drives selection.

mod builder;
pub mod utils;

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::kernel::SimilarityMeasure;
use crate::objectives::{ObjectiveKind, ObjectiveParams};
use crate::segmentation::{CostSource, SegmentationMode};

pub use builder::SummarizerConfigBuilder;

// Default constants

/// Default snippet length in seconds for fixed-length segmentation.
pub const DEFAULT_SNIPPET_LENGTH: f64 = 2.0;

/// Cost assigned to shot segments that span a single time unit.
/// Kept below one unit so that short shots are cheap to include.
pub const DEFAULT_SHORT_SHOT_COST: f64 = 0.5;

/// Default redundancy penalty for the graph cut objective.
/// Values above 0.5 make the objective non-monotone.
pub const DEFAULT_GRAPH_CUT_LAMBDA: f64 = 0.5;

/// Default saturation fraction for the saturated coverage objective.
pub const DEFAULT_SATURATION_ALPHA: f64 = 0.1;

/// Default relevance weight for MMR (0 = diversity only, 1 = relevance only).
pub const DEFAULT_MMR_RELEVANCE_WEIGHT: f64 = 0.7;

/// Default bandwidth for the Gaussian similarity kernel.
pub const DEFAULT_GAUSSIAN_SIGMA: f64 = 1.0;

/// Default seed for drawing the initial item of seeded objectives.
pub const DEFAULT_SEED: u64 = 0;

/// Main configuration structure for a summarization run.
///
/// Every field has a default, so a config file only needs the values that
/// differ. The builder provides a validated fluent alternative.
///
/// # Examples
///
/// ```rust
/// use vsumm_core::config::SummarizerConfigBuilder;
/// use vsumm_core::objectives::ObjectiveKind;
///
/// let config = SummarizerConfigBuilder::new()
///     .objective(ObjectiveKind::GraphCut)
///     .graph_cut_lambda(0.4)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(config.objective, ObjectiveKind::GraphCut);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Objective function maximized by the optimizer
    pub objective: ObjectiveKind,

    /// Similarity measure used to build the kernel matrix
    pub similarity: SimilarityMeasure,

    /// Relevance weight of the MMR objective, in [0, 1]
    pub mmr_relevance_weight: f64,

    /// Redundancy penalty of the graph cut objective
    pub graph_cut_lambda: f64,

    /// Saturation fraction of the saturated coverage objective, in (0, 1]
    pub saturation_alpha: f64,

    /// Seed for drawing the initial item of DisparityMin and MMR runs
    pub seed: u64,

    /// Explicit initial item; overrides the seeded draw when set
    pub initial_item: Option<usize>,

    /// Build kernel rows in parallel
    pub parallel_kernel: bool,

    /// Force the first and last segments into streaming summaries
    pub force_stream_endpoints: bool,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            objective: ObjectiveKind::FacilityLocation,
            similarity: SimilarityMeasure::Cosine,
            mmr_relevance_weight: DEFAULT_MMR_RELEVANCE_WEIGHT,
            graph_cut_lambda: DEFAULT_GRAPH_CUT_LAMBDA,
            saturation_alpha: DEFAULT_SATURATION_ALPHA,
            seed: DEFAULT_SEED,
            initial_item: None,
            parallel_kernel: true,
            force_stream_endpoints: true,
        }
    }
}

impl SummarizerConfig {
    /// Checks every hyperparameter against its valid range.
    pub fn validate(&self) -> CoreResult<()> {
        self.similarity.validate()?;
        self.objective_params().validate()
    }

    /// Hyperparameters handed to the objective constructors.
    pub fn objective_params(&self) -> ObjectiveParams {
        ObjectiveParams {
            mmr_relevance_weight: self.mmr_relevance_weight,
            graph_cut_lambda: self.graph_cut_lambda,
            saturation_alpha: self.saturation_alpha,
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded summarizer config from {}", path.as_ref().display());
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> CoreResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Applies `VSUMM_*` environment variable overrides on top of the
    /// current values.
    ///
    /// Numeric variables that fail to parse keep the current value. An
    /// unknown `VSUMM_OBJECTIVE` is an error.
    pub fn apply_env_overrides(&mut self) -> CoreResult<()> {
        if let Some(name) = utils::get_env_opt("VSUMM_OBJECTIVE") {
            self.objective = name.parse()?;
        }
        self.seed = utils::get_env_u64("VSUMM_SEED", self.seed);
        self.graph_cut_lambda = utils::get_env_f64("VSUMM_GRAPH_CUT_LAMBDA", self.graph_cut_lambda);
        self.saturation_alpha = utils::get_env_f64("VSUMM_SATURATION_ALPHA", self.saturation_alpha);
        self.mmr_relevance_weight = utils::get_env_f64("VSUMM_MMR_WEIGHT", self.mmr_relevance_weight);
        self.parallel_kernel = utils::get_env_bool("VSUMM_PARALLEL_KERNEL", self.parallel_kernel);
        if let SimilarityMeasure::Gaussian { sigma } = self.similarity {
            self.similarity = SimilarityMeasure::Gaussian {
                sigma: utils::get_env_f64("VSUMM_GAUSSIAN_SIGMA", sigma),
            };
        }
        self.validate()
    }
}

/// Configuration for turning a video timeline into segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Fixed-length snippets or shot boundaries
    pub mode: SegmentationMode,

    /// How segment costs are measured
    pub cost_source: CostSource,

    /// Cost of a shot segment spanning a single time unit
    pub short_shot_cost: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            mode: SegmentationMode::Fixed {
                snippet_length: DEFAULT_SNIPPET_LENGTH,
            },
            cost_source: CostSource::Duration,
            short_shot_cost: DEFAULT_SHORT_SHOT_COST,
        }
    }
}

impl SegmentationConfig {
    /// Fixed-length segmentation with the given snippet length.
    pub fn fixed(snippet_length: f64) -> Self {
        Self {
            mode: SegmentationMode::Fixed { snippet_length },
            ..Self::default()
        }
    }

    /// Shot segmentation over externally detected boundaries.
    pub fn shots(boundaries: Vec<f64>) -> Self {
        Self {
            mode: SegmentationMode::Shot { boundaries },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if let SegmentationMode::Fixed { snippet_length } = self.mode {
            if !(snippet_length.is_finite() && snippet_length > 0.0) {
                return Err(CoreError::InvalidConfig(format!(
                    "snippet length must be positive, got {}",
                    snippet_length
                )));
            }
        }
        if let CostSource::FrameCount { frame_rate } = self.cost_source {
            if !(frame_rate.is_finite() && frame_rate > 0.0) {
                return Err(CoreError::InvalidConfig(format!(
                    "frame rate must be positive, got {}",
                    frame_rate
                )));
            }
        }
        if !(self.short_shot_cost.is_finite() && self.short_shot_cost > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "short shot cost must be positive, got {}",
                self.short_shot_cost
            )));
        }
        Ok(())
    }
}
