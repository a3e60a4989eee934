//! # sysdump - Main Entry Point
//!
//! Loads a world snapshot, assembles its scheduling hierarchy and writes the
//! diagnostic report to stdout or to `--output`.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to follow
//! hierarchy assembly and Unknown type resolution.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::Write;

use sysdump::cli::Args;
use sysdump::domain::{HierarchyError, SnapshotError};
use sysdump::hierarchy::Hierarchy;
use sysdump::report::ReportRenderer;
use sysdump::world::WorldSnapshot;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_DATAERR: i32 = 65;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

/// Malformed snapshots and inconsistent hierarchies are data errors;
/// everything else (I/O, failed live lookups) is a generic failure.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    let invalid_data = err.chain().any(|cause| {
        matches!(cause.downcast_ref::<SnapshotError>(), Some(SnapshotError::Json(_)))
            || cause.is::<HierarchyError>()
    });

    if invalid_data {
        EXIT_DATAERR
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let snapshot = WorldSnapshot::from_file(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;
    info!("Loaded world '{}' with {} systems", snapshot.name(), snapshot.systems().len());

    let hierarchy = Hierarchy::build(&snapshot, snapshot.discover())
        .context("Failed to assemble system hierarchy")?;

    if !args.quiet {
        eprintln!("world: {}", snapshot.name());
        eprintln!("systems: {}", hierarchy.node_count());
    }

    let report = ReportRenderer::new(args.report_options())
        .render(&hierarchy)
        .context("Failed to render report")?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        if !args.quiet {
            eprintln!("saved: {}", path.display());
        }
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(report.as_bytes()).context("Failed to write report to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
    }

    Ok(())
}
