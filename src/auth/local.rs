//! In-process verifier for local development.
//!
//! Stands in for the verification backend when `auth.mode = "local"`. It
//! performs the same checks a real backend does instead of accepting every
//! signature:
//! - message parses and targets the configured domain
//! - EIP-191 signature recovers to the message address
//! - nonce was issued to that address, is unexpired, and is consumed on use
//! - expiration / not-before window holds

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use alloy::primitives::{Address, Signature};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::backend::VerificationBackend;
use crate::auth::message::SiweMessage;
use crate::auth::types::{AuthError, AuthResult, Nonce, Verdict};

/// Decode a 65-byte hex signature (`0x` prefix optional).
pub fn parse_signature(signature: &str) -> AuthResult<Signature> {
    let bytes = alloy::hex::decode(signature.trim())
        .map_err(|e| AuthError::InvalidSignature(format!("not hex: {}", e)))?;
    Signature::try_from(bytes.as_slice()).map_err(|e| AuthError::InvalidSignature(e.to_string()))
}

#[derive(Debug)]
struct IssuedNonce {
    address: Address,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct LocalState {
    nonces: HashMap<Nonce, IssuedNonce>,
    sessions: HashSet<String>,
}

/// Local verification backend.
#[derive(Debug)]
pub struct LocalVerifier {
    domain: String,
    nonce_ttl: Duration,
    state: Mutex<LocalState>,
}

impl LocalVerifier {
    pub fn new(domain: impl Into<String>, nonce_ttl: Duration) -> Self {
        Self {
            domain: domain.into(),
            nonce_ttl,
            state: Mutex::new(LocalState::default()),
        }
    }

    /// Number of issued nonces not yet consumed.
    pub fn outstanding_nonces(&self) -> usize {
        self.state.lock().expect("local verifier mutex poisoned").nonces.len()
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.state.lock().expect("local verifier mutex poisoned").sessions.len()
    }

    fn check(&self, message: &str, signature: &str) -> Result<Address, String> {
        let parsed: SiweMessage = message.parse().map_err(|e| format!("message parsing failed: {}", e))?;

        let signature = parse_signature(signature).map_err(|e| e.to_string())?;
        let recovered = signature
            .recover_address_from_msg(message.as_bytes())
            .map_err(|e| format!("signature recovery failed: {}", e))?;
        if recovered != parsed.address {
            return Err("signature does not match message address".to_string());
        }

        if parsed.domain != self.domain {
            return Err("invalid domain".to_string());
        }

        let now = Utc::now();
        if parsed.is_expired_at(now) {
            return Err("message has expired".to_string());
        }
        if parsed.is_premature_at(now) {
            return Err("message is not yet valid".to_string());
        }

        let mut state = self.state.lock().expect("local verifier mutex poisoned");
        let issued = state
            .nonces
            .remove(&parsed.nonce)
            .ok_or_else(|| "invalid nonce".to_string())?;
        if issued.address != parsed.address {
            return Err("nonce was issued to another address".to_string());
        }
        if Instant::now() >= issued.expires_at {
            return Err("nonce expired".to_string());
        }

        Ok(parsed.address)
    }
}

#[async_trait]
impl VerificationBackend for LocalVerifier {
    async fn issue_nonce(&self, address: Address) -> AuthResult<Nonce> {
        let nonce = Nonce::generate();
        let mut state = self.state.lock().expect("local verifier mutex poisoned");

        let now = Instant::now();
        state.nonces.retain(|_, issued| issued.expires_at > now);
        state.nonces.insert(
            nonce.clone(),
            IssuedNonce {
                address,
                expires_at: now + self.nonce_ttl,
            },
        );
        Ok(nonce)
    }

    async fn verify(&self, message: &str, signature: &str) -> AuthResult<Verdict> {
        match self.check(message, signature) {
            Ok(address) => {
                let token = Uuid::new_v4().simple().to_string();
                self.state
                    .lock()
                    .expect("local verifier mutex poisoned")
                    .sessions
                    .insert(token.clone());
                Ok(Verdict::Verified {
                    address,
                    token: Some(token),
                })
            }
            Err(reason) => Ok(Verdict::Rejected { reason }),
        }
    }

    async fn sign_out(&self, token: Option<&str>) -> AuthResult<()> {
        if let Some(token) = token {
            self.state
                .lock()
                .expect("local verifier mutex poisoned")
                .sessions
                .remove(token);
        }
        Ok(())
    }
}
