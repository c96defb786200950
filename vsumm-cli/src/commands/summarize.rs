//! The `summarize` command: segments the video, loads features, selects a
//! summary and prints or writes it.

use anyhow::{Context, bail};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;
use vsumm_core::{
    JsonSummaryWriter, SummarizerConfig, SummaryAssembler, VideoSummarizer, embed_segments,
};

use crate::cli::SummarizeArgs;
use crate::commands::{build_segments, load_features};
use crate::error::CliResult;
use crate::output;

/// Resolves the summarizer configuration: file (or defaults), then `VSUMM_*`
/// environment variables, then command-line flags.
pub fn resolve_config(args: &SummarizeArgs) -> CliResult<SummarizerConfig> {
    let mut config = match &args.config {
        Some(path) => SummarizerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SummarizerConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid VSUMM_* environment override")?;

    if let Some(objective) = args.objective {
        config.objective = objective;
    }
    if let Some(measure) = args.similarity.measure() {
        config.similarity = measure;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(item) = args.initial_item {
        config.initial_item = Some(item);
    }
    if args.no_stream_endpoints {
        config.force_stream_endpoints = false;
    }
    config.validate().context("Invalid summarizer settings")?;
    Ok(config)
}

pub fn run_summarize(args: SummarizeArgs) -> CliResult<()> {
    let start = Instant::now();
    let config = resolve_config(&args)?;
    debug!("Resolved config: {:?}", config);

    let Some(mode) = args.mode.mode() else {
        bail!("one of --budget, --coverage or --stream is required");
    };

    let segments = build_segments(&args.timeline)?;
    let features = load_features(&args.features)?;
    if features.len() != segments.len() {
        bail!(
            "{} has {} feature vectors but the video splits into {} segments",
            args.features.display(),
            features.len(),
            segments.len()
        );
    }
    let vectors = embed_segments(&features, &segments).context("Failed to collect segment features")?;

    let total_segments = segments.len();
    let summarizer = VideoSummarizer::new(segments, &vectors, config)
        .context("Failed to prepare the summarizer")?;
    let summary = summarizer
        .summarize(mode)
        .with_context(|| format!("Failed to summarize with the {} objective", summarizer.config().objective))?;

    if args.json {
        JsonSummaryWriter::new(io::stdout().lock())
            .assemble(&summary)
            .context("Failed to write the summary to stdout")?;
    } else {
        output::print_summary(&summary, total_segments);
    }

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        JsonSummaryWriter::new(BufWriter::new(file))
            .assemble(&summary)
            .with_context(|| format!("Failed to write the summary to {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    info!("Summarization finished in {:.2?}", start.elapsed());
    Ok(())
}
