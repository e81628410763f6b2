//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Gesture-driven yes/no survey kiosk
#[derive(Parser, Debug, Clone)]
#[command(name = "dwell-survey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run without a terminal UI, driven by a scripted visitor
    #[arg(long)]
    pub headless: bool,

    /// Number of update ticks to run in headless mode
    #[arg(long, default_value = "2000")]
    pub ticks: u64,

    /// Use the built-in questions and keep answers local
    #[arg(long)]
    pub offline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
