//! Parsing for the command line at startup

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Initial board size.
    #[arg(short, long, default_value_t = 7)]
    pub size: usize,

    /// Initial komi.
    #[arg(short, long, default_value_t = 0.0)]
    pub komi: f32,

    /// Seed for the agent's move picking.
    #[arg(long, default_value_t = 1)]
    pub seed: u32,

    /// Duplicate every protocol reply into this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log internal diagnostics at debug level.
    #[arg(short, long)]
    pub debug: bool,
}
