use std::sync::Arc;

use crate::adapters::toml_config::{KEY_CLEANUP_ON_FAILURE, KEY_FFMPEG_PATH, KEY_FFPROBE_PATH};
use crate::adapters::{FFmpegAdapter, FFprobeAdapter, LocalFsAdapter};
use crate::app::split_interactor::SplitInteractor;
use crate::domain::errors::DomainError;
use crate::ports::{ConfigPort, FsPort, ProbePort, TrimPort};

pub trait AppContainer: Send + Sync {
    fn split_interactor(&self) -> Arc<SplitInteractor>;
    fn probe_port(&self) -> Arc<dyn ProbePort>;
}

/// Wires the subprocess adapters according to the loaded configuration
pub struct DefaultAppContainer {
    split_interactor: Arc<SplitInteractor>,
    probe_port: Arc<dyn ProbePort>,
}

impl DefaultAppContainer {
    pub async fn new(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        let ffprobe = config.get_config_or_default(KEY_FFPROBE_PATH, "ffprobe").await?;
        let ffmpeg = config.get_config_or_default(KEY_FFMPEG_PATH, "ffmpeg").await?;
        let cleanup_on_failure = config.get_bool(KEY_CLEANUP_ON_FAILURE, false).await?;

        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::with_binary(ffprobe));
        let trim_port = Arc::new(FFmpegAdapter::with_binary(ffmpeg));
        let fs_port = Arc::new(LocalFsAdapter::new());

        let split_interactor = Arc::new(
            SplitInteractor::new(
                Arc::clone(&probe_port),
                trim_port as Arc<dyn TrimPort>,
                fs_port as Arc<dyn FsPort>,
            )
            .with_cleanup_on_failure(cleanup_on_failure),
        );

        Ok(Self {
            split_interactor,
            probe_port,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn split_interactor(&self) -> Arc<SplitInteractor> {
        Arc::clone(&self.split_interactor)
    }

    fn probe_port(&self) -> Arc<dyn ProbePort> {
        Arc::clone(&self.probe_port)
    }
}
