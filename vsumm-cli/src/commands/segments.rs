//! The `segments` command: shows how a video is split and costed.

use log::info;

use crate::cli::SegmentsArgs;
use crate::commands::build_segments;
use crate::error::CliResult;
use crate::output;

pub fn run_segments(args: SegmentsArgs) -> CliResult<()> {
    let segments = build_segments(&args.timeline)?;
    let total_cost: f64 = segments.iter().map(|s| s.cost).sum();
    info!("{} segments, total cost {:.3}", segments.len(), total_cost);

    output::print_heading("Segmentation");
    output::print_info("Segments", segments.len());
    output::print_info("Total cost", format!("{:.3}", total_cost));
    output::print_section("Segments");
    output::print_segment_table(&segments);
    Ok(())
}
