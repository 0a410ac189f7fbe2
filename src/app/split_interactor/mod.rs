// Split interactor - Orchestrates one probe-plan-trim run

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for the split use case
pub struct SplitInteractor {
    probe_port: Arc<dyn ProbePort>,
    trim_port: Arc<dyn TrimPort>,
    fs_port: Arc<dyn FsPort>,
    cleanup_on_failure: bool,
    state: Arc<RwLock<RunState>>,
}

impl SplitInteractor {
    /// Create new split interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        trim_port: Arc<dyn TrimPort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Self {
        Self {
            probe_port,
            trim_port,
            fs_port,
            cleanup_on_failure: false,
            state: Arc::new(RwLock::new(RunState::Idle)),
        }
    }

    /// Remove files this run wrote, partial ones included, when it fails
    pub fn with_cleanup_on_failure(mut self, enabled: bool) -> Self {
        self.cleanup_on_failure = enabled;
        self
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state.read().map(|s| *s).unwrap_or(RunState::Failed)
    }

    fn set_state(&self, state: RunState) {
        debug!("Run state -> {}", state);
        if let Ok(mut current) = self.state.write() {
            *current = state;
        }
    }

    /// Probe the source and build the plan without touching the disk
    pub async fn plan(&self, context: &RunContext) -> Result<OutputPlan, DomainError> {
        self.set_state(RunState::Validating);
        let result = self.probe_and_plan(context).await;
        self.set_state(match result {
            Ok(_) => RunState::Idle,
            Err(_) => RunState::Failed,
        });
        result
    }

    /// Run the whole split; cancellation is honoured between segments only
    pub async fn execute(
        &self,
        context: &RunContext,
        cancel: &CancellationToken,
    ) -> Result<SplitReport, DomainError> {
        info!(
            "Starting split of {} into {} segment(s)",
            context.source_path.display(),
            context.segments.len()
        );

        self.set_state(RunState::Validating);
        // Every output a trim was started for, including the failing one
        let mut touched = Vec::new();
        let result = self.run(context, cancel, &mut touched).await;

        match &result {
            Ok(report) => {
                self.set_state(RunState::Completed);
                info!(
                    "Split completed: {} file(s) in {}",
                    report.outputs.len(),
                    report.output_folder.display()
                );
            }
            Err(e) => {
                self.set_state(RunState::Failed);
                if e.is_input_error() {
                    warn!("Split rejected: {}", e);
                } else {
                    error!("Split failed: {}", e);
                }
                if self.cleanup_on_failure {
                    self.remove_partial_outputs(&touched).await;
                }
            }
        }

        result
    }

    async fn probe_and_plan(&self, context: &RunContext) -> Result<OutputPlan, DomainError> {
        require_source(&context.source_path)?;
        if context.segments.is_empty() {
            return Err(DomainError::NoSegments);
        }
        if !self.fs_port.file_exists(&context.source_path).await? {
            return Err(DomainError::FileNotFound(
                context.source_path.display().to_string(),
            ));
        }

        self.set_state(RunState::Probing);
        let duration = self.probe_port.probe_duration(&context.source_path).await?;
        info!("Source duration: {:.3}s", duration);

        SegmentPlanner::plan(context, duration)
    }

    async fn run(
        &self,
        context: &RunContext,
        cancel: &CancellationToken,
        touched: &mut Vec<PathBuf>,
    ) -> Result<SplitReport, DomainError> {
        let plan = self.probe_and_plan(context).await?;
        let mut outputs = Vec::with_capacity(plan.len());

        self.fs_port.ensure_directory(&plan.output_folder).await?;

        let total = plan.len();
        for planned in &plan.segments {
            if cancel.is_cancelled() {
                warn!("Cancellation requested, stopping before segment {}", planned.index + 1);
                return Err(DomainError::Cancelled {
                    completed: outputs.len(),
                });
            }

            self.set_state(RunState::Executing {
                index: planned.index,
                total,
            });
            info!(
                "Cutting segment {}/{} '{}' [{} - {}, {}s]",
                planned.index + 1,
                total,
                planned.segment.name,
                planned.segment.start,
                planned.segment.end,
                planned.segment.length()
            );

            let request = TrimRequest::for_segment(&plan.source_path, planned);
            touched.push(planned.output_path.clone());
            if let Err(failure) = self.trim_port.trim(&request).await {
                // A cut that fails once cancellation is requested was interrupted
                if cancel.is_cancelled() {
                    warn!(
                        "Segment {} did not finish after cancellation: {}",
                        planned.index + 1,
                        failure.output
                    );
                    return Err(DomainError::Cancelled {
                        completed: outputs.len(),
                    });
                }
                return Err(DomainError::TrimFailed {
                    position: planned.index + 1,
                    name: planned.segment.name.clone(),
                    exit_code: failure.exit_code,
                    output: failure.output,
                });
            }

            outputs.push(planned.output_path.clone());
        }

        Ok(SplitReport {
            output_folder: plan.output_folder,
            outputs,
            source_duration: plan.source_duration,
        })
    }

    async fn remove_partial_outputs(&self, touched: &[PathBuf]) {
        for path in touched {
            match self.fs_port.file_exists(path).await {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("Could not check partial output: {}", e);
                    continue;
                }
            }
            match self.fs_port.remove_file(path).await {
                Ok(()) => info!("Removed partial output {}", path.display()),
                Err(e) => warn!("Could not remove partial output: {}", e),
            }
        }
    }
}
