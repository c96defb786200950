//! The `kernel` command: builds the similarity kernel and prints its
//! statistics, for checking features before summarizing.

use anyhow::Context;
use vsumm_core::{SimilarityMeasure, build_kernel};

use crate::cli::KernelArgs;
use crate::commands::load_features;
use crate::error::CliResult;
use crate::output;

pub fn run_kernel(args: KernelArgs) -> CliResult<()> {
    let features = load_features(&args.features)?;
    let measure = args.similarity.measure().unwrap_or(SimilarityMeasure::Cosine);
    let kernel = build_kernel(features.vectors(), measure, !args.sequential)
        .context("Failed to build the similarity kernel")?;

    output::print_kernel_stats(&kernel.stats());
    output::print_info("Measure", measure);
    Ok(())
}
