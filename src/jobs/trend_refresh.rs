//! Trend Refresh Background Job
//!
//! Drives the trending recomputation cycle on a fixed cadence,
//! independent of request traffic. At most one cycle is ever in flight:
//! the loop runs cycles sequentially and a tick that fires while a cycle
//! is still running is skipped rather than queued. A cycle that cannot
//! finish inside its wall-clock limit is abandoned without publishing,
//! so a perpetually erroring post source never wedges the scheduler.

use std::sync::Arc;
use std::time::{Duration, Instant as StdInstant};

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{error, info};

use crate::config::TrendingConfig;
use crate::error::AppError;
use crate::metrics;
use crate::services::trending::TrendingService;

/// Delay before the first cycle so startup finishes binding first.
const STARTUP_DELAY: Duration = Duration::from_secs(5);

pub struct TrendRefreshJob {
    service: Arc<TrendingService>,
    interval: Duration,
    cycle_timeout: Duration,
}

impl TrendRefreshJob {
    pub fn new(service: Arc<TrendingService>, config: &TrendingConfig) -> Self {
        Self {
            service,
            interval: Duration::from_secs(config.refresh_interval_secs),
            cycle_timeout: Duration::from_secs(config.cycle_timeout_secs),
        }
    }

    /// Run the refresh loop. Intended to be spawned on the Tokio runtime.
    pub async fn run(self) {
        let mut ticker = interval_at(Instant::now() + STARTUP_DELAY, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            interval_secs = self.interval.as_secs(),
            cycle_timeout_secs = self.cycle_timeout.as_secs(),
            "Trend refresh job started"
        );

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// Spawn the refresh loop as a Tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// One scheduled cycle. Failures are logged and recorded, never
    /// propagated: the previous snapshot stays visible and the next tick
    /// retries from scratch.
    async fn run_cycle(&self) {
        let started = StdInstant::now();

        match timeout(self.cycle_timeout, self.service.recompute(Utc::now())).await {
            Ok(Ok(stats)) => {
                metrics::record_refresh_run("success");
                metrics::record_cycle_stats(
                    stats.posts_seen,
                    stats.posts_skipped,
                    stats.published_entries,
                );
                info!(
                    duration_ms = started.elapsed().as_millis(),
                    pages = stats.pages_fetched,
                    posts = stats.posts_seen,
                    skipped = stats.posts_skipped,
                    hashtags = stats.distinct_hashtags,
                    published = stats.published_entries,
                    "Trend refresh cycle completed"
                );
            }
            Ok(Err(e)) => {
                metrics::record_refresh_run("error");
                error!(
                    error = %e,
                    duration_ms = started.elapsed().as_millis(),
                    "Trend refresh cycle failed, keeping previous snapshot"
                );
            }
            Err(_) => {
                metrics::record_refresh_run("timeout");
                let err = AppError::CycleTimeout {
                    elapsed_secs: self.cycle_timeout.as_secs(),
                };
                error!(error = %err, "Trend refresh cycle timed out, keeping previous snapshot");
            }
        }

        metrics::record_refresh_duration(started.elapsed());
    }
}
