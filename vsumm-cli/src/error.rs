// ============================================================================
// vsumm-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: anyhow at the Command Boundary
//
// Commands return anyhow results, attaching context (which file, which step)
// to the typed vsumm-core errors underneath. main prints the full chain and
// exits with status 1.
//
// AI-ASSISTANT-INFO: CLI error handling utilities

use console::style;
use vsumm_core::CoreError;

/// Type alias for CLI results.
pub type CliResult<T> = anyhow::Result<T>;

/// Exit status for a failed command.
pub const EXIT_FAILURE: i32 = 1;

/// Finds the vsumm-core error at the root of a context chain, if any.
pub fn core_error(err: &anyhow::Error) -> Option<&CoreError> {
    err.chain().find_map(|cause| cause.downcast_ref::<CoreError>())
}

/// Formats the error with its context chain on one line.
pub fn format_error(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}

/// Prints the error chain in red to stderr.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{} {}", style("Error:").red().bold(), style(format_error(err)).red());
    if let Some(CoreError::UnsupportedConstraint { .. }) = core_error(err) {
        eprintln!(
            "{}",
            style(
                "Hint: coverage mode needs facility_location, or graph_cut (lambda <= 0.5) and \
                 saturate_coverage over a non-negative kernel such as --similarity gaussian"
            )
            .yellow()
        );
    }
}
