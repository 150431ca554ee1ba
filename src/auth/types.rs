//! Sign-in types and error definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::message::MessageError;
use crate::resilience::Retryable;

/// Minimum nonce length accepted in a SIWE message.
pub const MIN_NONCE_LEN: usize = 8;

/// Authentication status exposed to the wallet-connect layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationStatus {
    Unauthenticated,
    /// A nonce was issued and the adapter is waiting for a signed message.
    Authenticating,
    Authenticated,
}

impl fmt::Display for AuthenticationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthenticationStatus::Unauthenticated => "unauthenticated",
            AuthenticationStatus::Authenticating => "authenticating",
            AuthenticationStatus::Authenticated => "authenticated",
        };
        f.write_str(s)
    }
}

/// Single-use challenge token embedded in a sign-in message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nonce(String);

impl Nonce {
    /// Generate a fresh nonce: 16 random bytes, hex encoded.
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self(alloy::hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Nonce {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < MIN_NONCE_LEN || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MessageError::InvalidNonce(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Nonce {
    type Error = MessageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Nonce> for String {
    fn from(nonce: Nonce) -> Self {
        nonce.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend answer to a verification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Signature accepted for `address`. `token` is an optional bearer credential.
    Verified {
        address: Address,
        token: Option<String>,
    },
    /// Signature or message refused.
    Rejected { reason: String },
}

/// An authenticated session held by the adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub address: Address,
    pub chain_id: u64,
    pub(crate) token: Option<String>,
}

impl Session {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Errors that can occur during sign-in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend could not issue a nonce.
    #[error("Nonce issuance failed: {0}")]
    NonceIssuance(String),

    /// The backend refused to issue a nonce (4xx or `Status: false`).
    #[error("Nonce request refused: {0}")]
    NonceRefused(String),

    /// The sign-in message could not be built or parsed.
    #[error("Message construction failed: {0}")]
    MessageConstruction(#[from] MessageError),

    /// The backend refused the signature.
    #[error("Verification rejected: {0}")]
    VerificationRejected(String),

    /// Transport failure or 5xx from the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend call exceeded its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The message does not answer the current challenge, or the challenge
    /// was superseded while the verification was in flight.
    #[error("Stale nonce: the challenge was superseded or already used")]
    StaleNonce,

    /// The challenge outlived its TTL.
    #[error("Nonce expired")]
    NonceExpired,

    /// Operation not allowed in the current status.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: AuthenticationStatus,
        action: &'static str,
    },

    /// Signature bytes are malformed or recover to nobody.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

impl Retryable for AuthError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthError::NonceIssuance(_) | AuthError::Network(_) | AuthError::Timeout(_)
        )
    }
}

/// Result type for sign-in operations.
pub type AuthResult<T> = Result<T, AuthError>;
