//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::report::{ReportOptions, DEFAULT_SPACES_PER_INDENT};

#[derive(Parser, Debug)]
#[command(
    name = "sysdump",
    version,
    about = "Report the scheduling hierarchy of a captured world",
    after_help = "\
EXAMPLES:
    sysdump world.json                          Print the report to stdout
    sysdump world.json -o report.txt            Write the report to a file
    sysdump world.json --indent 2               Two spaces per nesting level

Set RUST_LOG=debug for details about hierarchy assembly."
)]
pub struct Args {
    /// World snapshot to report on (JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Spaces per indentation level (0 disables indentation)
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_SPACES_PER_INDENT)]
    pub indent: usize,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions { spaces_per_indent: self.indent }
    }
}
