//! Sign-in-with-Ethereum authentication.
//!
//! # Data Flow
//! ```text
//! wallet connected
//!     → AuthenticationAdapter::get_nonce(address)   → VerificationBackend::issue_nonce
//!     → AuthenticationAdapter::create_message(..)   (pure, EIP-4361 text)
//!     → wallet signs the text (EIP-191)
//!     → AuthenticationAdapter::verify(text, sig)    → VerificationBackend::verify
//!     → status: Authenticated | Unauthenticated
//! ```
//!
//! # Design Decisions
//! - Verification is never performed by trusting the client; either the
//!   remote backend or the local verifier recovers the signer
//! - `verify` is not retried: the nonce is single-use
//! - Late verdicts for superseded challenges are discarded

pub mod adapter;
pub mod backend;
pub mod local;
pub mod message;
pub mod types;

pub use adapter::AuthenticationAdapter;
pub use backend::{HttpBackend, VerificationBackend};
pub use local::LocalVerifier;
pub use message::{MessageContext, MessageError, MessageParams, SiweMessage};
pub use types::{AuthError, AuthResult, AuthenticationStatus, Nonce, Session, Verdict};
