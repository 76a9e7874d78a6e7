use std::sync::Arc;

use log::{error, info};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::SamplerError;

use super::loop_worker::{sampling_loop, LiveReading, SamplerConfig};
use super::screen::ScreenSource;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SamplerStatus {
    #[default]
    Idle,
    Running,
    Stopping,
}

/// Owns the live screen sampling task.
///
/// `start` must be called from within a tokio runtime; the loop is meant to
/// share the caller's (current-thread) runtime with the interactive path.
pub struct SamplerController {
    status: SamplerStatus,
    config: SamplerConfig,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    live_tx: Arc<watch::Sender<LiveReading>>,
}

impl SamplerController {
    pub fn new(config: SamplerConfig) -> Self {
        let (live_tx, _) = watch::channel(LiveReading::Waiting);
        Self {
            status: SamplerStatus::Idle,
            config: SamplerConfig {
                max_consecutive_failures: config.max_consecutive_failures.max(1),
                ..config
            },
            handle: None,
            cancel_token: None,
            live_tx: Arc::new(live_tx),
        }
    }

    pub fn status(&self) -> SamplerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SamplerStatus::Running
    }

    /// Live readings for display. Receivers stay valid across restarts.
    pub fn subscribe(&self) -> watch::Receiver<LiveReading> {
        self.live_tx.subscribe()
    }

    pub fn latest(&self) -> LiveReading {
        self.live_tx.borrow().clone()
    }

    pub fn start(&mut self, source: Arc<dyn ScreenSource>) -> Result<(), SamplerError> {
        if self.handle.is_some() {
            return Err(SamplerError::AlreadyRunning);
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        self.live_tx.send_replace(LiveReading::Waiting);

        let handle = tokio::spawn(sampling_loop(
            source,
            self.config,
            Arc::clone(&self.live_tx),
            token_clone,
        ));

        info!(
            "Screen sampler started ({}ms interval)",
            self.config.interval.as_millis()
        );
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.status = SamplerStatus::Running;
        Ok(())
    }

    /// Cancels the loop and waits for it to exit. Idempotent.
    ///
    /// A join failure means the loop may not have stopped cleanly and is
    /// returned rather than logged away.
    pub async fn stop(&mut self) -> Result<(), SamplerError> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        let Some(handle) = self.handle.take() else {
            self.status = SamplerStatus::Idle;
            return Ok(());
        };

        self.status = SamplerStatus::Stopping;
        let joined = handle.await;
        self.status = SamplerStatus::Idle;

        match joined {
            Ok(()) => {
                info!("Screen sampler stopped");
                Ok(())
            }
            Err(err) => {
                error!("Screen sampler task failed to join: {err}");
                Err(SamplerError::Join(err))
            }
        }
    }
}

impl Drop for SamplerController {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}
