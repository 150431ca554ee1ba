//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Auth adapter, backends, provider bootstrap produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
