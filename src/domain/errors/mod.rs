// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
///
/// Segment positions in messages are 1-based, the way a user counts rows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Segment name empty after trimming whitespace
    #[error("Segment {position} must have a name")]
    MissingName { position: usize },

    /// Segment start is not strictly before its end
    #[error("Segment {position}: end time ({end}) must be greater than start time ({start})")]
    InvalidRange { position: usize, start: u64, end: u64 },

    /// Segment end lies past the probed source duration
    #[error("Segment {position}: end time ({end}) exceeds the video duration ({duration})")]
    RangeExceedsSource { position: usize, end: u64, duration: f64 },

    /// Duration probe failed or returned garbage
    #[error("Failed to probe source duration: {0}")]
    ProbeFailed(String),

    /// Trim process exited non-zero
    #[error("Trimming segment {position} ({name}) failed with exit code {}: {output}", describe_exit(.exit_code))]
    TrimFailed {
        position: usize,
        name: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// H/M/S form field is blank or not an integer in its range
    #[error(
        "Segment {position}: invalid {field} value '{value}' \
         (hours 0-23, minutes and seconds 0-59; write 90 seconds as 1:30 in MM:SS)"
    )]
    InvalidField {
        position: usize,
        field: String,
        value: String,
    },

    /// Nothing to cut
    #[error("At least one segment is required")]
    NoSegments,

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Filesystem operation failed
    #[error("Filesystem error: {0}")]
    FsFail(String),

    /// Configuration could not be read or is invalid
    #[error("Configuration error: {0}")]
    ConfigFail(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Run cancelled between segments
    #[error("Run cancelled after {completed} segment(s)")]
    Cancelled { completed: usize },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

impl DomainError {
    /// True for failures caused by what the user typed, as opposed to the
    /// external tools or the filesystem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingName { .. }
                | DomainError::InvalidRange { .. }
                | DomainError::RangeExceedsSource { .. }
                | DomainError::InvalidField { .. }
                | DomainError::NoSegments
                | DomainError::BadArgs(_)
        )
    }
}
