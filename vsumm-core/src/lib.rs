//! Core library for summarizing videos by submodular segment selection.
//!
//! This crate segments a video timeline, builds a similarity kernel over
//! per-segment feature vectors, and greedily selects the segments that
//! maximize a submodular objective under a budget, a coverage target, or a
//! single streaming pass.
//!
//! ## Usage Example
//!
//! ```rust
//! use vsumm_core::{SegmentationConfig, Segmenter, SummarizerConfigBuilder, VideoSummarizer};
//! use vsumm_core::objectives::ObjectiveKind;
//!
//! let segments = Segmenter::new(SegmentationConfig::fixed(2.0))
//!     .unwrap()
//!     .segment(10.0)
//!     .unwrap();
//! let features: Vec<Vec<f32>> = vec![
//!     vec![1.0, 0.0],
//!     vec![0.9, 0.1],
//!     vec![0.0, 1.0],
//!     vec![0.1, 0.9],
//!     vec![0.7, 0.7],
//! ];
//!
//! let config = SummarizerConfigBuilder::new()
//!     .objective(ObjectiveKind::FacilityLocation)
//!     .build()
//!     .unwrap();
//! let summarizer = VideoSummarizer::new(segments, &features, config).unwrap();
//! let summary = summarizer.summarize_budget(4.0).unwrap();
//!
//! assert_eq!(summary.segments.len(), 2);
//! assert!(summary.selection.total_cost <= 4.0);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod kernel;
pub mod objectives;
pub mod optimizer;
pub mod segmentation;
pub mod summarizer;
pub mod utils;

// Re-exports for public API
pub use config::{SegmentationConfig, SummarizerConfig, SummarizerConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{
    embed_segments, Embedder, FixedBoundaries, JsonSummaryWriter, PrecomputedFeatures,
    ShotDetector, SummaryAssembler,
};
pub use kernel::{build_kernel, FeatureVector, KernelMatrix, SimilarityMeasure};
pub use objectives::{Objective, ObjectiveKind, ObjectiveParams, SetFunction};
pub use optimizer::{
    lazy_greedy_max_knapsack, lazy_greedy_max_sc, naive_greedy_max_knapsack, stream_greedy,
    SelectionMode, SelectionResult, SelectionWarning,
};
pub use segmentation::{Segment, Segmenter};
pub use summarizer::{Summary, VideoSummarizer};
pub use utils::{format_time_range, format_timestamp, parse_timestamp};
