// ============================================================================
// vsumm-core/src/segmentation.rs
// ============================================================================
//
// SEGMENTATION: Partitioning the Video Timeline into Selectable Segments
//
// This module turns a total video duration into an ordered list of disjoint
// segments, either fixed-length snippets or intervals between externally
// detected shot boundaries, and assigns each segment the cost used for budget
// accounting.
//
// KEY COMPONENTS:
// - Segment: one selectable time interval with its cost
// - Segmenter: applies a SegmentationConfig to a duration
// - fixed_start_times / shot_start_times: start-time generation per mode
//
// AI-ASSISTANT-INFO: Timeline segmentation and segment cost assignment

// ---- External crate imports ----
use log::{debug, info};
use serde::{Deserialize, Serialize};

// ---- Internal crate imports ----
use crate::config::SegmentationConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ShotDetector;

/// Gaps within this distance of one time unit count as single-unit shots.
const UNIT_GAP_TOLERANCE: f64 = 1e-6;

/// A contiguous time interval of the source video treated as one selectable unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Position of the segment in timeline order
    pub index: usize,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (exclusive)
    pub end: f64,
    /// Cost charged against the selection budget
    pub cost: f64,
}

impl Segment {
    /// Length of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// How the timeline is partitioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Snippets of equal length starting at 0, L, 2L, ...
    Fixed { snippet_length: f64 },
    /// Intervals between shot boundaries (seconds) from an external detector
    Shot { boundaries: Vec<f64> },
}

/// How segment costs are measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostSource {
    /// Cost is the segment duration in seconds
    Duration,
    /// Cost is the number of frames at the given frame rate
    FrameCount { frame_rate: f64 },
}

impl CostSource {
    fn cost_of(&self, duration: f64) -> f64 {
        match *self {
            CostSource::Duration => duration,
            CostSource::FrameCount { frame_rate } => (duration * frame_rate).round().max(1.0),
        }
    }
}

/// Start times `0, L, 2L, ...` strictly before `duration`.
///
/// # Errors
///
/// * `CoreError::InvalidConfig` - If the snippet length is zero, negative or not finite
/// * `CoreError::EmptyInput` - If the duration is not positive
pub fn fixed_start_times(duration: f64, snippet_length: f64) -> CoreResult<Vec<f64>> {
    if !(snippet_length.is_finite() && snippet_length > 0.0) {
        return Err(CoreError::InvalidConfig(format!(
            "snippet length must be positive, got {}",
            snippet_length
        )));
    }
    check_duration(duration)?;

    // Multiply instead of accumulating so long videos do not drift.
    let starts = (0..)
        .map(|k| k as f64 * snippet_length)
        .take_while(|&t| t < duration)
        .collect();
    Ok(starts)
}

/// Normalizes detected shot boundaries into segment start times.
///
/// Boundaries must be finite, strictly increasing and inside `[0, duration]`.
/// A missing leading 0 is inserted; a trailing boundary equal to `duration`
/// marks the end of the video rather than a start and is dropped.
pub fn shot_start_times(duration: f64, boundaries: &[f64]) -> CoreResult<Vec<f64>> {
    check_duration(duration)?;

    for (i, &t) in boundaries.iter().enumerate() {
        if !t.is_finite() || t < 0.0 || t > duration {
            return Err(CoreError::InvalidConfig(format!(
                "shot boundary {} ({}) lies outside the video [0, {}]",
                i, t, duration
            )));
        }
        if i > 0 && t <= boundaries[i - 1] {
            return Err(CoreError::InvalidConfig(format!(
                "shot boundaries must be strictly increasing ({} follows {})",
                t,
                boundaries[i - 1]
            )));
        }
    }

    let mut starts = Vec::with_capacity(boundaries.len() + 1);
    if boundaries.first().is_none_or(|&t| t > 0.0) {
        starts.push(0.0);
    }
    starts.extend(boundaries.iter().copied().filter(|&t| t < duration));
    Ok(starts)
}

fn check_duration(duration: f64) -> CoreResult<()> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(CoreError::EmptyInput(format!(
            "video duration must be positive, got {}",
            duration
        )));
    }
    Ok(())
}

/// Applies a segmentation configuration to a video duration.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    pub fn new(config: SegmentationConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Partitions `[0, duration)` into segments according to the configured mode.
    ///
    /// Segments are contiguous: each ends where the next starts and the last
    /// ends at `duration`.
    pub fn segment(&self, duration: f64) -> CoreResult<Vec<Segment>> {
        let segments = match &self.config.mode {
            SegmentationMode::Fixed { snippet_length } => {
                let starts = fixed_start_times(duration, *snippet_length)?;
                self.build_segments(&starts, duration, false)
            }
            SegmentationMode::Shot { boundaries } => {
                let starts = shot_start_times(duration, boundaries)?;
                self.build_segments(&starts, duration, true)
            }
        };
        info!(
            "Segmented {:.2}s of video into {} segments",
            duration,
            segments.len()
        );
        Ok(segments)
    }

    /// Segments the video at boundaries reported by an external shot detector,
    /// ignoring any boundaries stored in the configuration.
    pub fn segment_detected(
        &self,
        duration: f64,
        detector: &dyn ShotDetector,
    ) -> CoreResult<Vec<Segment>> {
        let boundaries = detector.detect(duration)?;
        debug!("Shot detector reported {} boundaries", boundaries.len());
        let starts = shot_start_times(duration, &boundaries)?;
        Ok(self.build_segments(&starts, duration, true))
    }

    fn build_segments(&self, starts: &[f64], duration: f64, shot_mode: bool) -> Vec<Segment> {
        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let end = starts.get(index + 1).copied().unwrap_or(duration);
                let length = end - start;
                let cost = if shot_mode && (length - 1.0).abs() <= UNIT_GAP_TOLERANCE {
                    self.config.short_shot_cost
                } else {
                    self.config.cost_source.cost_of(length)
                };
                Segment {
                    index,
                    start,
                    end,
                    cost,
                }
            })
            .collect()
    }
}

/// Cost list aligned 1:1 with the segments.
pub fn cost_list(segments: &[Segment]) -> Vec<f64> {
    segments.iter().map(|s| s.cost).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_mode_covers_the_whole_timeline() {
        let segmenter = Segmenter::new(SegmentationConfig::fixed(2.0)).unwrap();
        let segments = segmenter.segment(7.0).unwrap();

        let starts: Vec<f64> = segments.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(segments.last().unwrap().end, 7.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let costs = cost_list(&segments);
        assert_eq!(costs, vec![2.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn fixed_mode_rejects_non_positive_snippet_length() {
        assert!(matches!(
            fixed_start_times(10.0, 0.0),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            fixed_start_times(10.0, -1.0),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_duration_is_empty_input() {
        assert!(matches!(
            fixed_start_times(0.0, 1.0),
            Err(CoreError::EmptyInput(_))
        ));
    }

    #[test]
    fn shot_mode_assigns_short_shot_and_frame_costs() {
        let mut config = SegmentationConfig::shots(vec![3.0, 4.0, 9.0]);
        config.cost_source = CostSource::FrameCount { frame_rate: 2.0 };
        config.short_shot_cost = 0.25;
        let segments = Segmenter::new(config).unwrap().segment(10.0).unwrap();

        let bounds: Vec<(f64, f64)> = segments.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(bounds, vec![(0.0, 3.0), (3.0, 4.0), (4.0, 9.0), (9.0, 10.0)]);
        let costs = cost_list(&segments);
        assert_eq!(costs, vec![6.0, 0.25, 10.0, 0.25]);
    }

    #[test]
    fn shot_mode_drops_boundary_at_video_end() {
        let starts = shot_start_times(5.0, &[0.0, 2.0, 5.0]).unwrap();
        assert_eq!(starts, vec![0.0, 2.0]);
    }

    #[test]
    fn shot_mode_rejects_unsorted_boundaries() {
        assert!(matches!(
            shot_start_times(10.0, &[4.0, 2.0]),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            shot_start_times(10.0, &[11.0]),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
