//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to the verification backend:
//!     → tokio::time::timeout (every call has a deadline)
//!     → On retryable failure: retries.rs (retry with backoff.rs delays)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Only nonce issuance and sign-out are retried; a verification carries a
//!   single-use nonce and is never replayed automatically

pub mod backoff;
pub mod retries;

pub use retries::{RetryPolicy, Retryable};
