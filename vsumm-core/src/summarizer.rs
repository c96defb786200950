// ============================================================================
// vsumm-core/src/summarizer.rs
// ============================================================================
//
// SUMMARIZER: End-to-End Selection over a Segmented Video
//
// VideoSummarizer owns the segments, their costs and the kernel matrix built
// once from the segment features. Each summarize call constructs the
// configured objective over a borrowed kernel, dispatches once to the
// algorithm matching the selection mode, and packages the outcome as a
// Summary of time ranges.
//
// WORKFLOW:
// 1. Segment the video and embed each segment (see `segmentation`, `external`)
// 2. VideoSummarizer::new builds the kernel
// 3. summarize(mode) selects segments and returns a Summary
//
// AI-ASSISTANT-INFO: Orchestration of objective construction and optimizer dispatch

// ---- External crate imports ----
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ---- Internal crate imports ----
use crate::config::SummarizerConfig;
use crate::error::{CoreError, CoreResult};
use crate::kernel::{build_kernel, FeatureVector, KernelMatrix};
use crate::objectives::{with_objective, Objective, ObjectiveKind, SetFunction};
use crate::optimizer::{
    lazy_greedy_max_knapsack, lazy_greedy_max_sc, naive_greedy_max_knapsack, stream_greedy,
    SelectionMode, SelectionResult, StreamDecision,
};
use crate::segmentation::{cost_list, Segment};

/// Result of summarizing a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub objective: ObjectiveKind,
    pub mode: SelectionMode,
    /// Raw optimizer output, indices in insertion order
    pub selection: SelectionResult,
    /// Selected segments sorted by start time
    pub segments: Vec<Segment>,
    /// Summed duration of the selected segments in seconds
    pub total_duration: f64,
    /// Objective value of the whole video
    pub full_value: f64,
    /// `value / full_value` when the full value is positive
    pub coverage_fraction: Option<f64>,
    /// Per-item decisions of a streaming pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_decisions: Option<Vec<StreamDecision>>,
}

impl Summary {
    /// `(start, end)` of each selected segment, in timeline order.
    pub fn time_ranges(&self) -> Vec<(f64, f64)> {
        self.segments.iter().map(|s| (s.start, s.end)).collect()
    }
}

/// Selects summaries of one segmented video.
#[derive(Debug, Clone)]
pub struct VideoSummarizer {
    segments: Vec<Segment>,
    costs: Vec<f64>,
    kernel: KernelMatrix,
    config: SummarizerConfig,
}

impl VideoSummarizer {
    /// Builds the kernel over `features` (one vector per segment).
    ///
    /// # Errors
    ///
    /// * `CoreError::InvalidConfig` - On a segment/feature count mismatch or invalid config
    /// * `CoreError::DimensionMismatch` / `CoreError::DegenerateVector` - From kernel construction
    pub fn new(segments: Vec<Segment>, features: &[FeatureVector], config: SummarizerConfig) -> CoreResult<Self> {
        if segments.len() != features.len() {
            return Err(CoreError::InvalidConfig(format!(
                "{} segments but {} feature vectors",
                segments.len(),
                features.len()
            )));
        }
        config.validate()?;
        let kernel = build_kernel(features, config.similarity, config.parallel_kernel)?;
        Self::from_parts(segments, kernel, config)
    }

    /// Uses an already built kernel.
    pub fn from_parts(segments: Vec<Segment>, kernel: KernelMatrix, config: SummarizerConfig) -> CoreResult<Self> {
        if segments.is_empty() {
            return Err(CoreError::EmptyInput("no segments to summarize".to_string()));
        }
        if segments.len() != kernel.len() {
            return Err(CoreError::InvalidConfig(format!(
                "{} segments but a {}x{} kernel",
                segments.len(),
                kernel.len(),
                kernel.len()
            )));
        }
        config.validate()?;
        let costs = cost_list(&segments);
        Ok(Self {
            segments,
            costs,
            kernel,
            config,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn kernel(&self) -> &KernelMatrix {
        &self.kernel
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// The configured objective over this summarizer's kernel.
    pub fn objective(&self) -> CoreResult<Objective<'_>> {
        Objective::new(self.config.objective, &self.kernel, &self.config.objective_params())
    }

    pub fn summarize_budget(&self, budget: f64) -> CoreResult<Summary> {
        self.summarize(SelectionMode::Budget { budget })
    }

    pub fn summarize_coverage(&self, threshold: f64) -> CoreResult<Summary> {
        self.summarize(SelectionMode::Coverage { threshold })
    }

    pub fn summarize_stream(&self, epsilon: f64) -> CoreResult<Summary> {
        self.summarize(SelectionMode::Streaming { epsilon })
    }

    /// Selects a summary under `mode`.
    ///
    /// Budget mode uses the seeded naive greedy for DisparityMin and MMR and
    /// the unseeded lazy greedy otherwise, which itself scans naively when the
    /// kernel has negative entries. Coverage mode requires an objective that
    /// is monotone and submodular on this kernel. Streaming mode passes over
    /// the segments in timeline order.
    pub fn summarize(&self, mode: SelectionMode) -> CoreResult<Summary> {
        mode.validate()?;
        let objective = self.objective()?;
        info!(
            "Summarizing {} segments with the {} objective ({})",
            self.segments.len(),
            objective.kind(),
            mode
        );

        let (selection, stream_decisions, full_value) = with_objective!(&objective, f => {
            let (selection, decisions) = self.run(f, mode)?;
            let everything: Vec<usize> = (0..f.ground_set_size()).collect();
            (selection, decisions, f.evaluate(&everything))
        });

        let mut segments: Vec<Segment> = selection.sorted().into_iter().map(|i| self.segments[i]).collect();
        segments.sort_by(|a, b| a.start.total_cmp(&b.start));
        let total_duration = segments.iter().map(Segment::duration).sum();
        let coverage_fraction = (full_value > 0.0).then(|| selection.value / full_value);

        for warning in &selection.warnings {
            debug!("Selection warning: {}", warning);
        }
        info!(
            "Summary keeps {} of {} segments ({:.2}s, cost {:.3}, value {:.4})",
            segments.len(),
            self.segments.len(),
            total_duration,
            selection.total_cost,
            selection.value
        );

        Ok(Summary {
            objective: objective.kind(),
            mode,
            selection,
            segments,
            total_duration,
            full_value,
            coverage_fraction,
            stream_decisions,
        })
    }

    fn run<F: SetFunction>(
        &self,
        f: &F,
        mode: SelectionMode,
    ) -> CoreResult<(SelectionResult, Option<Vec<StreamDecision>>)> {
        match mode {
            SelectionMode::Budget { budget } => {
                let result = if f.requires_seed() {
                    let seed = self.initial_item()?;
                    debug!("Seeding {} with segment {}", f.name(), seed);
                    naive_greedy_max_knapsack(f, &self.costs, budget, &[seed])?
                } else {
                    lazy_greedy_max_knapsack(f, &self.costs, budget, &[])?
                };
                Ok((result, None))
            }
            SelectionMode::Coverage { threshold } => Ok((lazy_greedy_max_sc(f, &self.costs, threshold)?, None)),
            SelectionMode::Streaming { epsilon } => {
                let n = self.segments.len();
                let order: Vec<usize> = (0..n).collect();
                let force = self.config.force_stream_endpoints;
                let initial: &[usize] = if force { &[0] } else { &[] };
                let streamed = stream_greedy(f, &self.costs, epsilon, initial, &order)?;
                let mut selection = streamed.selection;
                let last = n - 1;
                if force && !selection.selected.contains(&last) {
                    selection.selected.push(last);
                    selection.total_cost += self.costs[last];
                    selection.value = f.evaluate(&selection.selected);
                    debug!("Appended final segment {} after the stream pass", last);
                }
                Ok((selection, Some(streamed.decisions)))
            }
        }
    }

    /// Seed for DisparityMin and MMR: the configured item, or one drawn from
    /// the configured RNG seed.
    fn initial_item(&self) -> CoreResult<usize> {
        let n = self.segments.len();
        match self.config.initial_item {
            Some(item) if item < n => Ok(item),
            Some(item) => Err(CoreError::InvalidConfig(format!(
                "initial item {} is out of range for {} segments",
                item, n
            ))),
            None => Ok(StdRng::seed_from_u64(self.config.seed).gen_range(0..n)),
        }
    }
}
