use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::screen::{sample_screen, LiveColor, ScreenSource};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_debug, log_error, log_info};

#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    pub interval: Duration,
    /// Consecutive failed ticks before the failure is surfaced to subscribers.
    pub max_consecutive_failures: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(50),
            max_consecutive_failures: 40,
        }
    }
}

/// What the live readout should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LiveReading {
    Waiting,
    Sample(LiveColor),
    Failing { consecutive: u32, message: String },
}

pub async fn sampling_loop(
    source: Arc<dyn ScreenSource>,
    config: SamplerConfig,
    live_tx: Arc<watch::Sender<LiveReading>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut consecutive_failures: u32 = 0;

    loop {
        tokio::select! {
            // Cancellation wins over a tick that is due at the same time.
            biased;

            _ = cancel_token.cancelled() => {
                log_info!("screen sampling loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let tick_start = Instant::now();
                let result = sample_screen(source.as_ref());

                if cancel_token.is_cancelled() {
                    break;
                }

                match result {
                    Ok(live) => {
                        if consecutive_failures >= config.max_consecutive_failures {
                            log_info!(
                                "screen capture recovered after {} failed ticks",
                                consecutive_failures
                            );
                        }
                        consecutive_failures = 0;
                        log_debug!(
                            "sampled {} at {:?} in {}us",
                            live.hex,
                            live.position,
                            tick_start.elapsed().as_micros()
                        );
                        live_tx.send_replace(LiveReading::Sample(live));
                    }
                    Err(err) => {
                        consecutive_failures = consecutive_failures.saturating_add(1);
                        log_debug!("skipping sampler tick: {err}");

                        if consecutive_failures == config.max_consecutive_failures {
                            log_error!(
                                "screen capture failing for {} consecutive ticks: {err}",
                                consecutive_failures
                            );
                        }
                        if consecutive_failures >= config.max_consecutive_failures {
                            live_tx.send_replace(LiveReading::Failing {
                                consecutive: consecutive_failures,
                                message: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }
}
