// Mock adapters - In-memory ports for tests and dry runs

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Probe adapter returning a fixed duration (or a fixed failure)
pub struct MockProbeAdapter {
    result: Result<f64, DomainError>,
    calls: Arc<Mutex<usize>>,
}

impl MockProbeAdapter {
    pub fn with_duration(seconds: f64) -> Self {
        Self {
            result: Ok(seconds),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(DomainError::ProbeFailed(message.to_string())),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of probe invocations so far
    pub fn calls(&self) -> usize {
        self.calls.lock().map(|c| *c).unwrap_or_default()
    }
}

#[async_trait]
impl ProbePort for MockProbeAdapter {
    async fn probe_duration(&self, _source_path: &Path) -> Result<f64, DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls += 1;
        }
        self.result.clone()
    }
}

/// Trim adapter that records requests and optionally fails one call
#[derive(Default)]
pub struct MockTrimAdapter {
    requests: Arc<Mutex<Vec<TrimRequest>>>,
    fail_at: Option<usize>,
    write_files: bool,
}

impl MockTrimAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with this 0-based index
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Write a small placeholder file for each request, failing ones included
    pub fn writing_files(mut self) -> Self {
        self.write_files = true;
        self
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<TrimRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TrimPort for MockTrimAdapter {
    async fn trim(&self, request: &TrimRequest) -> Result<(), TrimFailure> {
        let call = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| TrimFailure::new(None, "mock lock poisoned"))?;
            requests.push(request.clone());
            requests.len() - 1
        };

        // Like `ffmpeg -y`, the output exists even when the cut then fails
        if self.write_files {
            tokio::fs::write(&request.output_path, b"segment")
                .await
                .map_err(|e| TrimFailure::new(None, e.to_string()))?;
        }

        if self.fail_at == Some(call) {
            return Err(TrimFailure::new(Some(1), "mock trim failure"));
        }

        Ok(())
    }
}
