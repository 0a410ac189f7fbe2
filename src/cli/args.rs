//! Command-line argument definitions

use clap::Args;

use crate::form::TimeFields;

/// One `--segment START-END=NAME` argument, still unvalidated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    pub start: TimeFields,
    pub end: TimeFields,
    pub name: String,
}

/// clap value parser for `START-END=NAME`.
///
/// Times are `HH:MM:SS`, `MM:SS` or `SS`. The name is everything after the
/// first `=`, so it may itself contain `-` or `=`.
pub fn parse_segment_spec(raw: &str) -> Result<SegmentSpec, String> {
    let (range, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected START-END=NAME, got '{}'", raw))?;
    let (start, end) = range
        .split_once('-')
        .ok_or_else(|| format!("expected START-END before '=', got '{}'", range))?;

    Ok(SegmentSpec {
        start: TimeFields::from_clock(start).map_err(|e| e.to_string())?,
        end: TimeFields::from_clock(end).map_err(|e| e.to_string())?,
        name: name.to_string(),
    })
}

/// Inputs shared by `split` and `plan`
#[derive(Args, Debug, Clone)]
pub struct SegmentInputArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,

    /// Date label for the output folder and file names (default: today, YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Segment as START-END=NAME, e.g. 00:01:00-00:02:30=Intro (repeatable).
    /// Times are HH:MM:SS, MM:SS or SS with minutes and seconds 0-59, so 90s is 1:30
    #[arg(short, long = "segment", value_parser = parse_segment_spec)]
    pub segments: Vec<SegmentSpec>,

    /// TOML, YAML or JSON file listing segments (added before --segment ones)
    #[arg(long)]
    pub plan_file: Option<String>,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    #[command(flatten)]
    pub source: SegmentInputArgs,

    /// Delete files written by this run if a later segment fails
    #[arg(long)]
    pub cleanup_on_failure: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SegmentInputArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: String,
}
