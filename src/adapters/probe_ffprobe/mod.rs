//! FFprobe adapter for media duration probing
//!
//! Runs `ffprobe` as a child process and reads `format.duration` from its
//! plain, unkeyed output.

use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using `ffprobe` from PATH
    pub fn new() -> Self {
        Self::with_binary("ffprobe")
    }

    /// Create an adapter for a specific ffprobe executable
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Arguments asking for the container duration only
    pub fn duration_args(source_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "default=noprint_wrappers=1:nokey=1".to_string(),
            source_path.to_string_lossy().to_string(),
        ]
    }

    /// Parse ffprobe's output into seconds
    pub fn parse_duration(output: &Output) -> Result<f64, DomainError> {
        if !output.status.success() {
            return Err(DomainError::ProbeFailed(format!(
                "ffprobe exited with {}: {}",
                output.status,
                merged_output(output)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim();
        match text.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
            _ => Err(DomainError::ProbeFailed(format!(
                "unexpected ffprobe output: '{}'",
                merged_output(output)
            ))),
        }
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Command for an external tool, placed in its own process group on unix.
///
/// The terminal delivers Ctrl-C to the whole foreground group; only segcut
/// should see it, so a running probe or cut always completes.
pub(crate) fn detached_command(binary: &Path, args: &[String]) -> std::process::Command {
    let mut command = std::process::Command::new(binary);
    command.args(args);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command
}

/// Stdout followed by stderr, trimmed
pub(crate) fn merged_output(output: &Output) -> String {
    let mut merged = String::from_utf8_lossy(&output.stdout).to_string();
    merged.push_str(&String::from_utf8_lossy(&output.stderr));
    merged.trim().to_string()
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_duration(&self, source_path: &Path) -> Result<f64, DomainError> {
        let args = Self::duration_args(source_path);
        debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::from(detached_command(&self.binary, &args))
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeFailed(format!(
                    "could not run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        Self::parse_duration(&output)
    }
}
