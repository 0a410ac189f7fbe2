// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::DomainError;

/// Extension of every produced segment file
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Prefix of the dated output folder
pub const OUTPUT_FOLDER_PREFIX: &str = "segments_";

/// Date label format used when the user does not supply one
pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Time offset into the source, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TimeSpec {
    pub seconds: u64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Create a new TimeSpec from hours, minutes, seconds
    pub fn from_components(hours: u32, minutes: u32, seconds: u32) -> Self {
        let total = hours as u64 * 3600 + minutes as u64 * 60 + seconds as u64;
        Self { seconds: total }
    }

    /// Whole seconds
    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }

    /// Split back into (hours, minutes, seconds)
    pub fn components(&self) -> (u64, u64, u64) {
        (self.seconds / 3600, (self.seconds % 3600) / 60, self.seconds % 60)
    }

    /// Format as HH:MM:SS
    pub fn format_hms(&self) -> String {
        let (hours, minutes, seconds) = self.components();
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

/// One user-defined named sub-range of the source video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: TimeSpec,
    pub end: TimeSpec,
    pub name: String,
}

impl Segment {
    pub fn new(start: TimeSpec, end: TimeSpec, name: impl Into<String>) -> Self {
        Self {
            start,
            end,
            name: name.into(),
        }
    }

    /// Convenience constructor from whole seconds
    pub fn from_seconds(start: u64, end: u64, name: impl Into<String>) -> Self {
        Self::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end), name)
    }

    /// Length of the segment, zero when the range is inverted
    pub fn length(&self) -> u64 {
        self.end.seconds.saturating_sub(self.start.seconds)
    }
}

/// Everything one submission carries
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub source_path: PathBuf,
    pub date_label: String,
    pub segments: Vec<Segment>,
}

impl RunContext {
    /// Build a run context; a missing or blank date label falls back to today
    pub fn new(
        source_path: impl Into<PathBuf>,
        date_label: Option<String>,
        segments: Vec<Segment>,
    ) -> Self {
        let date_label = date_label
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(today_label);

        Self {
            source_path: source_path.into(),
            date_label,
            segments,
        }
    }
}

/// Today's local date as YYYY-MM-DD
pub fn today_label() -> String {
    chrono::Local::now().format(DATE_LABEL_FORMAT).to_string()
}

/// A validated segment paired with where it will be written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSegment {
    /// 0-based position in the submitted order
    pub index: usize,
    pub segment: Segment,
    pub output_path: PathBuf,
}

/// Derived output layout for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputPlan {
    pub source_path: PathBuf,
    pub date_label: String,
    pub output_folder: PathBuf,
    pub source_duration: f64,
    pub segments: Vec<PlannedSegment>,
}

impl OutputPlan {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Output paths in submission order
    pub fn output_paths(&self) -> Vec<&Path> {
        self.segments
            .iter()
            .map(|planned| planned.output_path.as_path())
            .collect()
    }
}

/// Instruction for a single stream-copy extraction
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRequest {
    pub source_path: PathBuf,
    pub start: TimeSpec,
    pub end: TimeSpec,
    pub output_path: PathBuf,
}

impl TrimRequest {
    pub fn for_segment(source_path: &Path, planned: &PlannedSegment) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            start: planned.segment.start,
            end: planned.segment.end,
            output_path: planned.output_path.clone(),
        }
    }
}

/// Lifecycle of one split run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Validating,
    Probing,
    Executing { index: usize, total: usize },
    Completed,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Validating => write!(f, "validating"),
            RunState::Probing => write!(f, "probing"),
            RunState::Executing { index, total } => {
                write!(f, "executing segment {}/{}", index + 1, total)
            }
            RunState::Completed => write!(f, "completed"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitReport {
    pub output_folder: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub source_duration: f64,
}

/// Ensure a source path was actually supplied
pub fn require_source(path: &Path) -> Result<(), DomainError> {
    if path.as_os_str().is_empty() {
        return Err(DomainError::BadArgs("No input file selected".to_string()));
    }
    Ok(())
}
