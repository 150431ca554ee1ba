//! Metrics collection.
//!
//! # Metrics
//! - `jibe_auth_events_total` (counter): sign-in lifecycle events by `event`
//! - `jibe_backend_request_seconds` (histogram): verification backend latency by `route`
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Record a sign-in lifecycle event (`nonce_issued`, `verified`, `rejected`, ...).
pub fn record_auth_event(event: &'static str) {
    if ENABLED.load(Ordering::Relaxed) {
        metrics::counter!("jibe_auth_events_total", "event" => event).increment(1);
    }
}

/// Record the latency of one backend call.
pub fn record_backend_latency(route: &'static str, elapsed: Duration) {
    if ENABLED.load(Ordering::Relaxed) {
        metrics::histogram!("jibe_backend_request_seconds", "route" => route)
            .record(elapsed.as_secs_f64());
    }
}
