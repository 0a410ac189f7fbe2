//! CLI module for segcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// segcut - cut named segments out of a video into a dated folder
///
/// Each segment is copied with ffmpeg's stream copy, so nothing is
/// re-encoded. Output goes to `<video dir>/segments_<date>/`.
#[derive(Parser, Debug)]
#[command(name = "segcut")]
#[command(about = "Cut named, dated segments out of a video without re-encoding")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, compact, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Configuration file (default: segcut.toml or config/segcut.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ffmpeg executable
    #[arg(long, global = true)]
    pub ffmpeg: Option<String>,

    /// ffprobe executable
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut every segment into its own file
    Split(args::SplitArgs),
    /// Validate segments against the source and print the output plan
    Plan(args::PlanArgs),
    /// Print the duration of a video in seconds
    Probe(args::ProbeArgs),
}
