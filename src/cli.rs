//! Command-line arguments for the viewer.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rust_timeline_view::ViewMode;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rust-timeline-view",
    version,
    about = "Timeline view of tasks across resource rows, with dependency arrows.",
    long_about = None
)]
pub struct CliArgs {
    /// Timeline JSON file to open. Shows a demo timeline when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial view granularity (day, week, month).
    #[arg(long, value_name = "MODE", default_value = "week")]
    pub view: ViewMode,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TIMELINE_LOG` or `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
