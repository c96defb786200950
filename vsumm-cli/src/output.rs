// ============================================================================
// vsumm-cli/src/output.rs
// ============================================================================
//
// TERMINAL OUTPUT: Human-Readable Tables for Summaries and Diagnostics
//
// AI-ASSISTANT-INFO: Styled stdout rendering of summaries, segments and kernel stats

use console::style;
use std::fmt::Display;
use vsumm_core::kernel::KernelStats;
use vsumm_core::{Segment, Summary, format_time_range, format_timestamp};

/// Print a heading with styling and clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", style(&line).blue().bright());
    println!("{}", style(format!(" {} ", text)).bold().white().bright());
    println!("{}\n", style(&line).blue().bright());
}

/// Print a section heading (smaller than main heading)
pub fn print_section(text: &str) {
    let line = "-".repeat(40);
    println!("\n{}", style(&line).blue());
    println!("{}", style(format!(" {} ", text)).bold().white());
    println!("{}", style(&line).blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", style(label).cyan().bright(), value);
}

pub fn print_warning<T: Display>(message: T) {
    println!("{} {}", style("Warning:").yellow().bold(), style(message).yellow());
}

/// One row per segment: index, time range, duration and cost.
pub fn print_segment_table(segments: &[Segment]) {
    println!(
        "{:>5}  {:<29}  {:>9}  {:>9}",
        style("#").bold(),
        style("time range").bold(),
        style("duration").bold(),
        style("cost").bold()
    );
    for segment in segments {
        println!(
            "{:>5}  {:<29}  {:>8.3}s  {:>9.3}",
            segment.index,
            format_time_range(segment.start, segment.end),
            segment.duration(),
            segment.cost
        );
    }
}

pub fn print_summary(summary: &Summary, total_segments: usize) {
    print_heading("Video Summary");
    print_info("Objective", summary.objective);
    print_info("Mode", summary.mode);
    print_info(
        "Selected segments",
        format!("{} of {}", summary.segments.len(), total_segments),
    );
    print_info("Summary duration", format_timestamp(summary.total_duration));
    print_info("Total cost", format!("{:.3}", summary.selection.total_cost));
    print_info("Objective value", format!("{:.4}", summary.selection.value));
    match summary.coverage_fraction {
        Some(fraction) => print_info("Coverage of full video", format!("{:.1}%", fraction * 100.0)),
        None => print_info("Full video value", format!("{:.4}", summary.full_value)),
    }
    print_info("Gain evaluations", summary.selection.evaluations);

    for warning in &summary.selection.warnings {
        print_warning(warning);
    }

    if !summary.segments.is_empty() {
        print_section("Selected Segments");
        print_segment_table(&summary.segments);
    }
}

pub fn print_kernel_stats(stats: &KernelStats) {
    print_heading("Similarity Kernel");
    print_info("Size", format!("{0}x{0}", stats.size));
    print_info("Min similarity", format!("{:.4}", stats.min));
    print_info("Max similarity", format!("{:.4}", stats.max));
    print_info("Mean off-diagonal", format!("{:.4}", stats.mean_off_diagonal));
    let symmetric = if stats.symmetric {
        style("yes").green()
    } else {
        style("no").red()
    };
    print_info("Symmetric", symmetric);
    let non_negative = if stats.non_negative {
        style("yes").green()
    } else {
        style("no (graph_cut and saturate_coverage lose monotonicity)").yellow()
    };
    print_info("Non-negative", non_negative);
}
