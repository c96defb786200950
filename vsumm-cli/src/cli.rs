// vsumm-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vsumm_core::{ObjectiveKind, SelectionMode, SimilarityMeasure};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vsumm: Video summarization by submodular segment selection",
    long_about = "Selects the most representative segments of a video from precomputed \
                  segment features using vsumm-core's greedy submodular optimizers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Selects summary segments from a features file
    Summarize(SummarizeArgs),
    /// Prints how a video of the given duration is segmented
    Segments(SegmentsArgs),
    /// Prints statistics of the similarity kernel built from a features file
    Kernel(KernelArgs),
}

/// How the video timeline is cut into segments.
#[derive(Args, Debug, Clone)]
pub struct TimelineArgs {
    /// Video duration, in seconds or as HH:MM:SS(.fff)
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    pub duration: f64,

    /// Length of fixed snippets in seconds (default: 2)
    #[arg(long, value_name = "SECONDS", conflicts_with = "shots")]
    pub snippet_length: Option<f64>,

    /// JSON file with detected shot boundary times; segments follow shots
    #[arg(long, value_name = "FILE")]
    pub shots: Option<PathBuf>,

    /// Charge segments by frame count at this frame rate instead of seconds
    #[arg(long, value_name = "FPS")]
    pub frame_rate: Option<f64>,

    /// Cost of one-second shots (default: 0.5)
    #[arg(long, value_name = "COST", requires = "shots")]
    pub short_shot_cost: Option<f64>,
}

/// Similarity measure selection shared by the summarize and kernel commands.
#[derive(Args, Debug, Clone)]
pub struct SimilarityArgs {
    /// Similarity measure: cosine or gaussian
    #[arg(long, value_name = "MEASURE", value_parser = parse_similarity)]
    pub similarity: Option<SimilarityMeasure>,

    /// Bandwidth of the gaussian measure (implies --similarity gaussian)
    #[arg(long, value_name = "SIGMA")]
    pub sigma: Option<f64>,
}

impl SimilarityArgs {
    /// The measure requested on the command line, if any.
    pub fn measure(&self) -> Option<SimilarityMeasure> {
        match (self.similarity, self.sigma) {
            (Some(SimilarityMeasure::Cosine), _) => Some(SimilarityMeasure::Cosine),
            (_, Some(sigma)) => Some(SimilarityMeasure::Gaussian { sigma }),
            (measure, None) => measure,
        }
    }
}

/// Exactly one selection constraint.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ModeArgs {
    /// Maximum total cost of the summary (seconds, or frames with --frame-rate)
    #[arg(short, long, value_name = "BUDGET")]
    pub budget: Option<f64>,

    /// Fraction of the full-video objective value the summary must reach (0-1)
    #[arg(short, long, value_name = "FRACTION")]
    pub coverage: Option<f64>,

    /// Single streaming pass with this threshold scale
    #[arg(long, value_name = "EPSILON")]
    pub stream: Option<f64>,
}

impl ModeArgs {
    pub fn mode(&self) -> Option<SelectionMode> {
        if let Some(budget) = self.budget {
            Some(SelectionMode::Budget { budget })
        } else if let Some(threshold) = self.coverage {
            Some(SelectionMode::Coverage { threshold })
        } else {
            self.stream.map(|epsilon| SelectionMode::Streaming { epsilon })
        }
    }
}

#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// JSON file with one feature vector per segment
    #[arg(short, long, value_name = "FILE")]
    pub features: PathBuf,

    #[command(flatten)]
    pub timeline: TimelineArgs,

    /// Objective: disparity_min, mmr, facility_location, graph_cut, saturate_coverage
    #[arg(short, long, value_name = "NAME", value_parser = parse_objective)]
    pub objective: Option<ObjectiveKind>,

    #[command(flatten)]
    pub mode: ModeArgs,

    #[command(flatten)]
    pub similarity: SimilarityArgs,

    /// Seed for drawing the initial segment of disparity_min and mmr
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Start disparity_min and mmr from this segment instead of a seeded draw
    #[arg(long, value_name = "INDEX")]
    pub initial_item: Option<usize>,

    /// Do not force the first and last segments into streaming summaries
    #[arg(long, default_value_t = false)]
    pub no_stream_endpoints: bool,

    /// Optional: JSON summarizer configuration file.
    /// Can also be set via the VSUMM_CONFIG environment variable.
    #[arg(long, value_name = "FILE", env = "VSUMM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Optional: write the summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SegmentsArgs {
    #[command(flatten)]
    pub timeline: TimelineArgs,
}

#[derive(Parser, Debug)]
pub struct KernelArgs {
    /// JSON file with one feature vector per segment
    #[arg(short, long, value_name = "FILE")]
    pub features: PathBuf,

    #[command(flatten)]
    pub similarity: SimilarityArgs,

    /// Build the kernel on a single thread
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

// --- Value Parsers ---

fn parse_duration(text: &str) -> Result<f64, String> {
    vsumm_core::parse_timestamp(text)
        .ok_or_else(|| format!("'{}' is not a duration in seconds or HH:MM:SS", text))
}

fn parse_objective(text: &str) -> Result<ObjectiveKind, String> {
    text.parse::<ObjectiveKind>().map_err(|e| e.to_string())
}

fn parse_similarity(text: &str) -> Result<SimilarityMeasure, String> {
    text.parse::<SimilarityMeasure>().map_err(|e| e.to_string())
}
