// vsumm-cli/src/lib.rs
//
// Library portion of the vsumm CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, KernelArgs, SegmentsArgs, SummarizeArgs};
pub use commands::kernel::run_kernel;
pub use commands::segments::run_segments;
pub use commands::summarize::run_summarize;
pub use error::CliResult;
