//! End-to-end runs through the external collaborator traits: shot detection,
//! embedding, summarization and JSON assembly.

use std::cell::Cell;
use vsumm_core::*;

/// Embedder that derives a vector from the segment's position on the timeline
/// and counts how often it is called.
struct TimelineEmbedder {
    calls: Cell<usize>,
}

impl Embedder for TimelineEmbedder {
    fn embed(&self, segment: &Segment) -> CoreResult<FeatureVector> {
        self.calls.set(self.calls.get() + 1);
        let phase = segment.start as f32;
        Ok(vec![1.0 + phase.cos(), 1.0 + phase.sin(), 0.5])
    }
}

#[test]
fn detected_shots_flow_into_a_json_summary() {
    let detector = FixedBoundaries::new(vec![0.0, 3.0, 4.0, 8.0, 12.0]);
    let segmenter = Segmenter::new(SegmentationConfig::shots(Vec::new())).unwrap();
    let segments = segmenter.segment_detected(15.0, &detector).unwrap();
    assert_eq!(segments.len(), 5);
    // the one-second shot gets the reduced cost
    assert_eq!(segments[1].cost, 0.5);

    let embedder = TimelineEmbedder { calls: Cell::new(0) };
    let features = embed_segments(&embedder, &segments).unwrap();
    assert_eq!(embedder.calls.get(), 5);

    let summarizer = VideoSummarizer::new(segments, &features, SummarizerConfig::default()).unwrap();
    let summary = summarizer.summarize_budget(8.0).unwrap();
    assert!(summary.selection.total_cost <= 8.0);

    let mut writer = JsonSummaryWriter::new(Vec::new());
    writer.assemble(&summary).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();
    assert_eq!(json["objective"], "facility_location");
    assert_eq!(json["mode"]["type"], "budget");
    assert_eq!(
        json["segments"].as_array().map(Vec::len),
        Some(summary.segments.len())
    );
}

#[test]
fn every_objective_summarizes_in_budget_mode() {
    let segments = Segmenter::new(SegmentationConfig::fixed(2.0))
        .unwrap()
        .segment(20.0)
        .unwrap();
    let embedder = TimelineEmbedder { calls: Cell::new(0) };
    let features = embed_segments(&embedder, &segments).unwrap();

    for kind in ObjectiveKind::ALL {
        let config = SummarizerConfigBuilder::new().objective(kind).seed(3).build().unwrap();
        let summarizer = VideoSummarizer::new(segments.clone(), &features, config).unwrap();
        let summary = summarizer.summarize_budget(6.0).unwrap();
        assert_eq!(summary.objective, kind);
        assert_eq!(summary.segments.len(), 3, "{} should fill the budget", kind);
    }
}

#[test]
fn tiny_budget_produces_an_empty_summary_with_warning() {
    let segments = Segmenter::new(SegmentationConfig::fixed(2.0))
        .unwrap()
        .segment(10.0)
        .unwrap();
    let embedder = TimelineEmbedder { calls: Cell::new(0) };
    let features = embed_segments(&embedder, &segments).unwrap();
    let summarizer = VideoSummarizer::new(segments, &features, SummarizerConfig::default()).unwrap();

    let summary = summarizer.summarize_budget(1.0).unwrap();

    assert!(summary.segments.is_empty());
    assert!(matches!(
        summary.selection.warnings.as_slice(),
        [SelectionWarning::BudgetTooSmall { .. }]
    ));
}

#[test]
fn degenerate_features_are_rejected() {
    let segments = Segmenter::new(SegmentationConfig::fixed(1.0))
        .unwrap()
        .segment(3.0)
        .unwrap();
    let features: Vec<FeatureVector> = vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 1.0]];
    assert!(matches!(
        VideoSummarizer::new(segments.clone(), &features, SummarizerConfig::default()),
        Err(CoreError::DegenerateVector { index: 1 })
    ));

    let features: Vec<FeatureVector> = vec![vec![1.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 1.0]];
    assert!(matches!(
        VideoSummarizer::new(segments, &features, SummarizerConfig::default()),
        Err(CoreError::DimensionMismatch { index: 1, expected: 2, found: 3 })
    ));
}
