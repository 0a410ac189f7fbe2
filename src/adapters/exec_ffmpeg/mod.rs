//! FFmpeg execution adapter
//!
//! Extracts a segment with `-c copy`, so nothing is re-encoded.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::adapters::probe_ffprobe::{detached_command, merged_output};
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based trim adapter
pub struct FFmpegAdapter {
    binary: PathBuf,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using `ffmpeg` from PATH
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    /// Create an adapter for a specific ffmpeg executable
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the stream-copy argument list for one request
    pub fn trim_args(request: &TrimRequest) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            request.source_path.to_string_lossy().to_string(),
            "-ss".to_string(),
            request.start.as_seconds().to_string(),
            "-to".to_string(),
            request.end.as_seconds().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            request.output_path.to_string_lossy().to_string(),
        ]
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrimPort for FFmpegAdapter {
    async fn trim(&self, request: &TrimRequest) -> Result<(), TrimFailure> {
        let args = Self::trim_args(request);
        debug!("Running {} {:?}", self.binary.display(), args);

        let output = Command::from(detached_command(&self.binary, &args))
            .output()
            .await
            .map_err(|e| {
                TrimFailure::new(None, format!("could not run {}: {}", self.binary.display(), e))
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(TrimFailure::new(output.status.code(), merged_output(&output)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_trim_args_use_stream_copy() {
        let request = TrimRequest {
            source_path: PathBuf::from("/v/in.mp4"),
            start: TimeSpec::from_seconds(10),
            end: TimeSpec::from_seconds(30),
            output_path: PathBuf::from("/v/segments_2024-06-01/[2024-06-01] B.mp4"),
        };
        assert_eq!(
            FFmpegAdapter::trim_args(&request),
            vec![
                "-y",
                "-i",
                "/v/in.mp4",
                "-ss",
                "10",
                "-to",
                "30",
                "-c",
                "copy",
                "/v/segments_2024-06-01/[2024-06-01] B.mp4"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_has_no_exit_code() {
        let adapter = FFmpegAdapter::with_binary("/nonexistent/ffmpeg-for-tests");
        let request = TrimRequest {
            source_path: PathBuf::from("in.mp4"),
            start: TimeSpec::from_seconds(0),
            end: TimeSpec::from_seconds(1),
            output_path: Path::new("out.mp4").to_path_buf(),
        };
        let failure = adapter.trim(&request).await.unwrap_err();
        assert_eq!(failure.exit_code, None);
        assert!(failure.output.contains("could not run"));
    }
}
