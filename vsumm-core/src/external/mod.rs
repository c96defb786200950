// ============================================================================
// vsumm-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL COLLABORATORS: Seams for Embedding, Shot Detection and Assembly
//
// The summarizer consumes feature vectors and shot boundaries and produces a
// list of time ranges, but it never decodes video or renders output itself.
// This module defines those collaborators as traits so callers can plug in a
// real embedding model, shot detector or video renderer, and provides simple
// implementations backed by precomputed data.
//
// KEY COMPONENTS:
// - Embedder: one feature vector per segment
// - ShotDetector: shot boundary times for a video
// - SummaryAssembler: consumes the finished summary
// - PrecomputedFeatures, FixedBoundaries, JsonSummaryWriter: data-backed implementations
//
// DESIGN PHILOSOPHY:
// Dependency injection through traits, so tests and the CLI can drive the
// whole pipeline from JSON files.
//
// AI-ASSISTANT-INFO: Trait seams for external embedding, detection and rendering

// ---- External crate imports ----
use log::debug;

// ---- Standard library imports ----
use std::fs;
use std::io::Write;
use std::path::Path;

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::kernel::FeatureVector;
use crate::segmentation::Segment;
use crate::summarizer::Summary;

// ============================================================================
// TRAITS
// ============================================================================

/// Produces a feature vector for a segment of the video.
pub trait Embedder {
    fn embed(&self, segment: &Segment) -> CoreResult<FeatureVector>;
}

/// Reports shot boundary times (seconds, increasing) for a video.
pub trait ShotDetector {
    fn detect(&self, duration: f64) -> CoreResult<Vec<f64>>;
}

/// Receives the finished summary, e.g. to cut a montage or write a report.
pub trait SummaryAssembler {
    fn assemble(&mut self, summary: &Summary) -> CoreResult<()>;
}

/// Embeds every segment, in order.
pub fn embed_segments(embedder: &dyn Embedder, segments: &[Segment]) -> CoreResult<Vec<FeatureVector>> {
    segments.iter().map(|segment| embedder.embed(segment)).collect()
}

// ============================================================================
// PRECOMPUTED FEATURES
// ============================================================================

/// Embedder backed by a table of vectors indexed by segment position.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedFeatures {
    vectors: Vec<FeatureVector>,
}

impl PrecomputedFeatures {
    pub fn new(vectors: Vec<FeatureVector>) -> Self {
        Self { vectors }
    }

    /// Loads a JSON array of arrays of numbers.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let vectors: Vec<FeatureVector> = serde_json::from_str(&content)?;
        if vectors.is_empty() {
            return Err(CoreError::EmptyInput(format!(
                "no feature vectors in {}",
                path.as_ref().display()
            )));
        }
        debug!(
            "Loaded {} feature vectors from {}",
            vectors.len(),
            path.as_ref().display()
        );
        Ok(Self { vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<FeatureVector> {
        self.vectors
    }
}

impl Embedder for PrecomputedFeatures {
    fn embed(&self, segment: &Segment) -> CoreResult<FeatureVector> {
        self.vectors.get(segment.index).cloned().ok_or_else(|| {
            CoreError::InvalidConfig(format!(
                "no feature vector for segment {} ({} vectors available)",
                segment.index,
                self.vectors.len()
            ))
        })
    }
}

// ============================================================================
// FIXED BOUNDARIES
// ============================================================================

/// Shot detector that replays a known list of boundaries.
#[derive(Debug, Clone, Default)]
pub struct FixedBoundaries {
    boundaries: Vec<f64>,
}

impl FixedBoundaries {
    pub fn new(boundaries: Vec<f64>) -> Self {
        Self { boundaries }
    }

    /// Loads a JSON array of boundary times in seconds.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let boundaries: Vec<f64> = serde_json::from_str(&content)?;
        Ok(Self { boundaries })
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }
}

impl ShotDetector for FixedBoundaries {
    fn detect(&self, _duration: f64) -> CoreResult<Vec<f64>> {
        Ok(self.boundaries.clone())
    }
}

// ============================================================================
// JSON SUMMARY WRITER
// ============================================================================

/// Assembler that writes the summary as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonSummaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonSummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SummaryAssembler for JsonSummaryWriter<W> {
    fn assemble(&mut self, summary: &Summary) -> CoreResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, summary)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
