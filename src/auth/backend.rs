//! Verification backend client.
//!
//! # Responsibilities
//! - Request fresh nonces for an address
//! - Forward signed messages for verification
//! - Tear down the server-side session on sign-out
//!
//! # Wire format
//! ```text
//! POST {base}/generate-nonce  {"eth_addr": "0x.."}                → 201 {"Status":true,"Message":..,"Data":{"nonce":".."}}
//! POST {base}/verify          {"message": "..", "signature":"0x.."} → 200 {"Status":true,"Data":{"valid":true,"token"?:..}}
//!                                                                   → 4xx {"Status":false,"Message":".."}
//! 4xx on any route is a refusal and is not retried; 5xx is a retryable network error.
//! POST {base}/logout          Authorization: Bearer <token>       → 2xx
//! ```

use std::time::{Duration, Instant};

use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::message::SiweMessage;
use crate::auth::types::{AuthError, AuthResult, Nonce, Verdict};
use crate::observability::metrics;

/// The external collaborator that issues nonces and checks signatures.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Issue a fresh single-use nonce for `address`.
    async fn issue_nonce(&self, address: Address) -> AuthResult<Nonce>;

    /// Check `signature` over `message`.
    async fn verify(&self, message: &str, signature: &str) -> AuthResult<Verdict>;

    /// Invalidate the server-side session identified by `token`, if any.
    async fn sign_out(&self, token: Option<&str>) -> AuthResult<()>;
}

/// Response envelope used by every backend route.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "Status")]
    status: bool,
    #[serde(rename = "Message", default)]
    message: String,
    #[serde(rename = "Data")]
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct NonceRequest<'a> {
    eth_addr: &'a str,
}

#[derive(Debug, Deserialize)]
struct NonceData {
    nonce: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    message: &'a str,
    signature: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the verification backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpBackend {
    /// Create a backend client rooted at `base_url` (e.g., "http://localhost:8080/v1/auth").
    pub fn new(base_url: &str, timeout: Duration) -> AuthResult<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| AuthError::Network(format!("Invalid backend URL '{}': {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route)
    }

    fn transport_error(&self, err: reqwest::Error) -> AuthError {
        if err.is_timeout() {
            AuthError::Timeout(self.timeout)
        } else {
            AuthError::Network(err.to_string())
        }
    }

    async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AuthResult<(StatusCode, Envelope<T>)> {
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if status.is_server_error() {
            return Err(AuthError::Network(format!("backend returned {}: {}", status, body)));
        }
        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(envelope) => Ok((status, envelope)),
            // Plain-text refusals still count as refusals.
            Err(_) if status.is_client_error() => Ok((
                status,
                Envelope {
                    status: false,
                    message: body,
                    data: None,
                },
            )),
            Err(e) => Err(AuthError::Network(format!(
                "unreadable backend response ({}): {}",
                status, e
            ))),
        }
    }
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl VerificationBackend for HttpBackend {
    async fn issue_nonce(&self, address: Address) -> AuthResult<Nonce> {
        let started = Instant::now();
        let eth_addr = address.to_checksum(None);
        let response = self
            .client
            .post(self.url("generate-nonce"))
            .json(&NonceRequest { eth_addr: &eth_addr })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        metrics::record_backend_latency("generate-nonce", started.elapsed());

        let (status, envelope) = match self.read_envelope::<NonceData>(response).await {
            Ok(read) => read,
            Err(AuthError::Network(reason)) => return Err(AuthError::NonceIssuance(reason)),
            Err(other) => return Err(other),
        };

        if status.is_client_error() || !envelope.status {
            return Err(AuthError::NonceRefused(format!("{}: {}", status, envelope.message)));
        }
        if !status.is_success() {
            return Err(AuthError::NonceIssuance(format!("unexpected status {}", status)));
        }
        let data = envelope
            .data
            .ok_or_else(|| AuthError::NonceIssuance("response carried no nonce".to_string()))?;

        data.nonce
            .parse::<Nonce>()
            .map_err(|e| AuthError::NonceIssuance(e.to_string()))
    }

    async fn verify(&self, message: &str, signature: &str) -> AuthResult<Verdict> {
        let started = Instant::now();
        let response = self
            .client
            .post(self.url("verify"))
            .json(&VerifyRequest { message, signature })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        metrics::record_backend_latency("verify", started.elapsed());

        let (status, envelope) = self.read_envelope::<VerifyData>(response).await?;

        if status.is_client_error() || !envelope.status {
            return Err(AuthError::VerificationRejected(envelope.message));
        }

        match envelope.data {
            Some(data) if data.valid => {
                let address = match data.address {
                    Some(address) => address,
                    None => message
                        .parse::<SiweMessage>()
                        .map(|m| m.address)
                        .map_err(|e| AuthError::VerificationRejected(e.to_string()))?,
                };
                Ok(Verdict::Verified {
                    address,
                    token: data.token,
                })
            }
            Some(data) => Ok(Verdict::Rejected {
                reason: data.error.unwrap_or_else(|| "invalid signature".to_string()),
            }),
            None => Ok(Verdict::Rejected {
                reason: "backend returned no verdict".to_string(),
            }),
        }
    }

    async fn sign_out(&self, token: Option<&str>) -> AuthResult<()> {
        let started = Instant::now();
        let mut request = self.client.post(self.url("logout"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        metrics::record_backend_latency("logout", started.elapsed());

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status.is_server_error() {
            Err(AuthError::Network(format!("logout returned {}", status)))
        } else {
            // A 4xx means the server no longer knows the session; nothing left to tear down.
            tracing::debug!(status = %status, "Backend had no session to invalidate");
            Ok(())
        }
    }
}
