//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command; the
//! helpers here turn shared argument groups into vsumm-core inputs.

/// Module containing the implementation of the `summarize` command.
pub mod summarize;

/// Module containing the implementation of the `segments` command.
pub mod segments;

/// Module containing the implementation of the `kernel` command.
pub mod kernel;

use anyhow::Context;
use log::debug;
use vsumm_core::config::DEFAULT_SNIPPET_LENGTH;
use vsumm_core::segmentation::{CostSource, SegmentationMode};
use vsumm_core::{FixedBoundaries, PrecomputedFeatures, Segment, SegmentationConfig, Segmenter};

use crate::cli::TimelineArgs;
use crate::error::CliResult;

/// Segments the timeline described by the arguments, reading shot
/// boundaries from disk when `--shots` is given.
pub fn build_segments(args: &TimelineArgs) -> CliResult<Vec<Segment>> {
    let mut config = SegmentationConfig::fixed(args.snippet_length.unwrap_or(DEFAULT_SNIPPET_LENGTH));
    if let Some(frame_rate) = args.frame_rate {
        config.cost_source = CostSource::FrameCount { frame_rate };
    }
    if let Some(cost) = args.short_shot_cost {
        config.short_shot_cost = cost;
    }

    match &args.shots {
        Some(path) => {
            let detector = FixedBoundaries::from_json_file(path)
                .with_context(|| format!("Failed to read shot boundaries from {}", path.display()))?;
            debug!("Read {} shot boundaries from {}", detector.boundaries().len(), path.display());
            config.mode = SegmentationMode::Shot {
                boundaries: Vec::new(),
            };
            let segmenter = Segmenter::new(config).context("Invalid segmentation settings")?;
            segmenter
                .segment_detected(args.duration, &detector)
                .context("Failed to segment the video at the detected shots")
        }
        None => {
            let segmenter = Segmenter::new(config).context("Invalid segmentation settings")?;
            segmenter
                .segment(args.duration)
                .context("Failed to segment the video")
        }
    }
}

/// Loads the precomputed feature table.
pub fn load_features(path: &std::path::Path) -> CliResult<PrecomputedFeatures> {
    PrecomputedFeatures::from_json_file(path)
        .with_context(|| format!("Failed to load features from {}", path.display()))
}
