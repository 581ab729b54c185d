//! Trend Refresh Metrics
//!
//! Prometheus metrics for the trending recomputation job and the
//! published snapshot.

use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Encoder, Histogram,
    IntCounterVec, IntGauge, TextEncoder,
};
use std::time::Duration;

static REFRESH_RUNS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "trend_refresh_runs_total",
        "Total trend recomputation cycles (success/error/timeout)",
        &["status"]
    )
    .expect("Failed to register trend refresh runs metric")
});

static REFRESH_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "trend_refresh_duration_seconds",
        "Duration of trend recomputation cycles",
        vec![0.01, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0]
    )
    .expect("Failed to register trend refresh duration metric")
});

static POSTS_SCANNED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "trend_posts_scanned",
        "Posts scanned in the last completed cycle"
    )
    .expect("Failed to register posts scanned metric")
});

static POSTS_SKIPPED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "trend_posts_skipped",
        "Malformed posts skipped in the last completed cycle"
    )
    .expect("Failed to register posts skipped metric")
});

static SNAPSHOT_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "trend_snapshot_size",
        "Entries in the currently published trend snapshot"
    )
    .expect("Failed to register snapshot size metric")
});

/// Record cycle outcome (success/error/timeout)
pub fn record_refresh_run(status: &str) {
    REFRESH_RUNS_TOTAL.with_label_values(&[status]).inc();
}

/// Record cycle wall-clock duration
pub fn record_refresh_duration(duration: Duration) {
    REFRESH_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record scan stats from the last completed cycle
pub fn record_cycle_stats(posts_seen: u64, posts_skipped: u64, snapshot_size: usize) {
    POSTS_SCANNED.set(posts_seen as i64);
    POSTS_SKIPPED.set(posts_skipped as i64);
    SNAPSHOT_SIZE.set(snapshot_size as i64);
}

/// GET /metrics handler
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
