use vsumm_core::{
    ObjectiveKind, SegmentationConfig, Segmenter, SelectionMode, SummarizerConfigBuilder,
    VideoSummarizer, format_time_range,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A 30 second video in 3 second snippets, with features drifting through
    // three "scenes".
    let segments = Segmenter::new(SegmentationConfig::fixed(3.0))?.segment(30.0)?;
    let features: Vec<Vec<f32>> = segments
        .iter()
        .map(|s| {
            let t = s.start as f32 / 30.0;
            vec![1.0 - t, (t * std::f32::consts::PI).sin(), t, 0.1]
        })
        .collect();

    for kind in ObjectiveKind::ALL {
        let config = SummarizerConfigBuilder::new().objective(kind).seed(1).build()?;
        let summarizer = VideoSummarizer::new(segments.clone(), &features, config)?;

        let budget = summarizer.summarize(SelectionMode::Budget { budget: 9.0 })?;
        println!("{kind} (budget 9s):");
        for segment in &budget.segments {
            println!("  {}", format_time_range(segment.start, segment.end));
        }

        match summarizer.summarize(SelectionMode::Coverage { threshold: 0.9 }) {
            Ok(summary) => println!("  90% coverage needs {} segments", summary.segments.len()),
            Err(e) => println!("  coverage: {e}"),
        }
    }
    Ok(())
}
