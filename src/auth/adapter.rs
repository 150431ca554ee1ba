//! Authentication adapter: the sign-in state machine.
//!
//! # State Transitions
//! ```text
//! Unauthenticated → Authenticating: get_nonce issued a challenge
//! Authenticating  → Authenticating: get_nonce again (new challenge supersedes the old)
//! Authenticating  → Authenticated:  verify got a positive verdict for the current challenge
//! Authenticating  → Unauthenticated: verify rejected or failed
//! any             → Unauthenticated: sign_out
//! ```
//!
//! The session mutex is never held across an `.await`. Every challenge bumps
//! an epoch; a verification that comes back after the epoch moved is
//! discarded instead of applied.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use alloy::primitives::Address;
use tokio::sync::watch;
use tokio::time::timeout;
use uuid::Uuid;

use crate::auth::backend::{HttpBackend, VerificationBackend};
use crate::auth::local::LocalVerifier;
use crate::auth::message::{MessageContext, MessageError, MessageParams, SiweMessage};
use crate::auth::types::{AuthError, AuthResult, AuthenticationStatus, Nonce, Session, Verdict};
use crate::config::{AuthConfig, AuthMode, RetryConfig};
use crate::observability::metrics;
use crate::resilience::RetryPolicy;

#[derive(Debug, Clone)]
struct Challenge {
    nonce: Nonce,
    address: Address,
    issued_at: Instant,
}

#[derive(Debug)]
struct SessionState {
    status: AuthenticationStatus,
    challenge: Option<Challenge>,
    session: Option<Session>,
    epoch: u64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            status: AuthenticationStatus::Unauthenticated,
            challenge: None,
            session: None,
            epoch: 0,
        }
    }
}

/// Bridges the wallet-connect flow and the verification backend.
pub struct AuthenticationAdapter {
    backend: Arc<dyn VerificationBackend>,
    context: MessageContext,
    retry: RetryPolicy,
    request_timeout: Duration,
    nonce_ttl: Duration,
    state: Mutex<SessionState>,
    status_tx: watch::Sender<AuthenticationStatus>,
}

impl AuthenticationAdapter {
    /// Create an adapter around an explicit backend.
    pub fn new(
        backend: Arc<dyn VerificationBackend>,
        context: MessageContext,
        retry: RetryPolicy,
        request_timeout: Duration,
        nonce_ttl: Duration,
    ) -> Self {
        let (status_tx, _) = watch::channel(AuthenticationStatus::Unauthenticated);
        Self {
            backend,
            context,
            retry,
            request_timeout,
            nonce_ttl,
            state: Mutex::new(SessionState::new()),
            status_tx,
        }
    }

    /// Build the adapter and its backend from configuration.
    pub fn from_config(auth: &AuthConfig, retries: &RetryConfig) -> AuthResult<Self> {
        let request_timeout = Duration::from_secs(auth.request_timeout_secs);
        let nonce_ttl = Duration::from_secs(auth.nonce_ttl_secs);

        let backend: Arc<dyn VerificationBackend> = match auth.mode {
            AuthMode::Remote => Arc::new(HttpBackend::new(&auth.backend_url, request_timeout)?),
            AuthMode::Local => {
                tracing::warn!("Using in-process signature verification; local development only");
                Arc::new(LocalVerifier::new(auth.domain.clone(), nonce_ttl))
            }
        };

        Ok(Self::new(
            backend,
            MessageContext::from_config(auth),
            RetryPolicy::from_config(retries),
            request_timeout,
            nonce_ttl,
        ))
    }

    /// Current status.
    pub fn status(&self) -> AuthenticationStatus {
        self.lock().status
    }

    /// Observe status transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthenticationStatus> {
        self.status_tx.subscribe()
    }

    /// The authenticated session, if any.
    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// The fixed message context.
    pub fn context(&self) -> &MessageContext {
        &self.context
    }

    /// Request a fresh challenge for `address`.
    pub async fn get_nonce(&self, address: Address) -> AuthResult<Nonce> {
        let from = self.status();
        if from == AuthenticationStatus::Authenticated {
            return Err(AuthError::InvalidTransition {
                from,
                action: "request a nonce",
            });
        }

        let nonce = self
            .retry
            .execute("issue_nonce", || self.with_deadline(self.backend.issue_nonce(address)))
            .await
            .map_err(|e| match e {
                AuthError::Network(reason) => AuthError::NonceIssuance(reason),
                other => other,
            })?;

        {
            let mut state = self.lock();
            if state.status == AuthenticationStatus::Authenticated {
                // Someone completed a sign-in while we were waiting.
                return Err(AuthError::InvalidTransition {
                    from: state.status,
                    action: "request a nonce",
                });
            }
            state.epoch += 1;
            state.challenge = Some(Challenge {
                nonce: nonce.clone(),
                address,
                issued_at: Instant::now(),
            });
            self.transition(&mut state, AuthenticationStatus::Authenticating);
        }

        metrics::record_auth_event("nonce_issued");
        tracing::debug!(address = %address, "Issued sign-in challenge");
        Ok(nonce)
    }

    /// Build the message the wallet will sign. Pure.
    pub fn create_message(&self, params: &MessageParams) -> AuthResult<SiweMessage> {
        self.context.create_message(params).map_err(|e| {
            tracing::warn!(error = %e, "Sign-in message construction failed");
            AuthError::from(e)
        })
    }

    /// Verify a signed message. Returns whether the session is now authenticated.
    pub async fn verify(&self, message: &str, signature: &str) -> AuthResult<bool> {
        let parsed: SiweMessage = message.parse()?;

        let epoch = {
            let mut state = self.lock();
            if state.status != AuthenticationStatus::Authenticating {
                return Err(AuthError::InvalidTransition {
                    from: state.status,
                    action: "verify",
                });
            }
            let challenge = state.challenge.as_ref().ok_or(AuthError::StaleNonce)?;
            if challenge.nonce != parsed.nonce || challenge.address != parsed.address {
                return Err(AuthError::StaleNonce);
            }
            if parsed.domain != self.context.domain {
                return Err(MessageError::InvalidDomain(parsed.domain.clone()).into());
            }
            if parsed.uri != self.context.uri {
                return Err(MessageError::InvalidUri(parsed.uri.clone()).into());
            }
            if challenge.issued_at.elapsed() >= self.nonce_ttl {
                state.challenge = None;
                self.transition(&mut state, AuthenticationStatus::Unauthenticated);
                metrics::record_auth_event("nonce_expired");
                return Err(AuthError::NonceExpired);
            }
            state.epoch
        };

        tracing::debug!(
            address = %parsed.address,
            signature_len = signature.len(),
            "Forwarding signed message for verification"
        );
        let outcome = self.with_deadline(self.backend.verify(message, signature)).await;

        let mut state = self.lock();
        if state.epoch != epoch || state.challenge.is_none() {
            tracing::warn!(address = %parsed.address, "Discarding verification for a superseded challenge");
            metrics::record_auth_event("stale_verification");
            return Err(AuthError::StaleNonce);
        }
        // The challenge is single-use whatever the outcome.
        state.challenge = None;

        match outcome {
            Ok(Verdict::Verified { address, token }) if address == parsed.address => {
                let session = Session {
                    id: Uuid::new_v4(),
                    address,
                    chain_id: parsed.chain_id,
                    token,
                };
                tracing::info!(address = %address, session_id = %session.id, "Sign-in verified");
                state.session = Some(session);
                self.transition(&mut state, AuthenticationStatus::Authenticated);
                metrics::record_auth_event("verified");
                Ok(true)
            }
            Ok(Verdict::Verified { address, .. }) => {
                tracing::warn!(
                    expected = %parsed.address,
                    actual = %address,
                    "Backend verified a different address"
                );
                self.transition(&mut state, AuthenticationStatus::Unauthenticated);
                metrics::record_auth_event("rejected");
                Ok(false)
            }
            Ok(Verdict::Rejected { reason }) | Err(AuthError::VerificationRejected(reason)) => {
                tracing::info!(address = %parsed.address, reason = %reason, "Sign-in rejected");
                self.transition(&mut state, AuthenticationStatus::Unauthenticated);
                metrics::record_auth_event("rejected");
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(address = %parsed.address, error = %err, "Verification failed");
                self.transition(&mut state, AuthenticationStatus::Unauthenticated);
                metrics::record_auth_event("verify_failed");
                Err(err)
            }
        }
    }

    /// End the session. Status is `Unauthenticated` afterwards, even when the
    /// backend could not be reached; that failure is still returned.
    pub async fn sign_out(&self) -> AuthResult<()> {
        let session = {
            let mut state = self.lock();
            // Invalidate any verification still in flight.
            state.epoch += 1;
            state.challenge = None;
            state.session.clone()
        };

        let notified = match &session {
            Some(session) => {
                let token = session.token.as_deref();
                self.retry
                    .execute("sign_out", || self.with_deadline(self.backend.sign_out(token)))
                    .await
            }
            None => Ok(()),
        };

        {
            let mut state = self.lock();
            state.session = None;
            state.challenge = None;
            self.transition(&mut state, AuthenticationStatus::Unauthenticated);
        }

        metrics::record_auth_event("signed_out");
        match &notified {
            Ok(()) => tracing::info!(had_session = session.is_some(), "Signed out"),
            Err(e) => tracing::warn!(error = %e, "Signed out locally; backend session teardown failed"),
        }
        notified
    }

    async fn with_deadline<T, F>(&self, fut: F) -> AuthResult<T>
    where
        F: std::future::Future<Output = AuthResult<T>>,
    {
        match timeout(self.request_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(AuthError::Timeout(self.request_timeout)),
        }
    }

    fn transition(&self, state: &mut SessionState, next: AuthenticationStatus) {
        if state.status != next {
            tracing::debug!(from = %state.status, to = %next, "Authentication status changed");
            state.status = next;
        }
        self.status_tx.send_replace(next);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().expect("auth session mutex poisoned")
    }
}

impl std::fmt::Debug for AuthenticationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationAdapter")
            .field("domain", &self.context.domain)
            .field("status", &self.status())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::signer::{signature_hex, DevSigner, ANVIL_TEST_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Notify;

    /// Backend whose verdicts are scripted by the test.
    struct ScriptedBackend {
        verdict: Mutex<Option<AuthResult<Verdict>>>,
        nonce_failures: AtomicU32,
        verify_calls: AtomicU32,
        sign_out_calls: AtomicU32,
        fail_sign_out: bool,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedBackend {
        fn accepting() -> Self {
            Self {
                verdict: Mutex::new(None),
                nonce_failures: AtomicU32::new(0),
                verify_calls: AtomicU32::new(0),
                sign_out_calls: AtomicU32::new(0),
                fail_sign_out: false,
                gate: None,
            }
        }

        fn with_verdict(self, verdict: AuthResult<Verdict>) -> Self {
            *self.verdict.lock().unwrap() = Some(verdict);
            self
        }
    }

    #[async_trait]
    impl VerificationBackend for ScriptedBackend {
        async fn issue_nonce(&self, _address: Address) -> AuthResult<Nonce> {
            if self.nonce_failures.load(Ordering::SeqCst) > 0 {
                self.nonce_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(AuthError::Network("503".into()));
            }
            Ok(Nonce::generate())
        }

        async fn verify(&self, message: &str, _signature: &str) -> AuthResult<Verdict> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let scripted = self.verdict.lock().unwrap().take();
            match scripted {
                Some(verdict) => verdict,
                None => {
                    let parsed: SiweMessage = message.parse()?;
                    Ok(Verdict::Verified {
                        address: parsed.address,
                        token: Some("tok".into()),
                    })
                }
            }
        }

        async fn sign_out(&self, _token: Option<&str>) -> AuthResult<()> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_sign_out {
                Err(AuthError::VerificationRejected("teardown refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn context() -> MessageContext {
        MessageContext {
            domain: "localhost:3000".to_string(),
            uri: "http://localhost:3000".to_string(),
            statement: Some("Sign in to jibe.".to_string()),
            version: "1".to_string(),
        }
    }

    fn adapter(backend: Arc<dyn VerificationBackend>) -> AuthenticationAdapter {
        AuthenticationAdapter::new(
            backend,
            context(),
            RetryPolicy::from_config(&RetryConfig {
                enabled: true,
                max_attempts: 3,
                base_delay_ms: 1,
                max_delay_ms: 2,
            }),
            Duration::from_secs(5),
            Duration::from_secs(60),
        )
    }

    async fn sign(adapter: &AuthenticationAdapter, signer: &DevSigner, nonce: Nonce) -> (String, String) {
        let message = adapter
            .create_message(&MessageParams {
                nonce,
                address: signer.address(),
                chain_id: 31337,
            })
            .unwrap()
            .to_string();
        let signature = signature_hex(&signer.sign_message(&message).await.unwrap());
        (message, signature)
    }

    fn signer() -> DevSigner {
        DevSigner::from_private_key(ANVIL_TEST_KEY).unwrap()
    }

    #[tokio::test]
    async fn test_full_sign_in_and_out() {
        let backend = Arc::new(ScriptedBackend::accepting());
        let adapter = adapter(backend.clone());
        let signer = signer();
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);

        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticating);

        let (message, signature) = sign(&adapter, &signer, nonce).await;
        assert!(adapter.verify(&message, &signature).await.unwrap());
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticated);

        let session = adapter.session().unwrap();
        assert_eq!(session.address, signer.address());
        assert_eq!(session.chain_id, 31337);
        assert!(session.has_token());

        adapter.sign_out().await.unwrap();
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
        assert!(adapter.session().is_none());
        assert_eq!(backend.sign_out_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_verify_without_challenge_never_authenticates() {
        let adapter = adapter(Arc::new(ScriptedBackend::accepting()));
        let signer = signer();
        let (message, signature) = sign(&adapter, &signer, Nonce::generate()).await;

        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidTransition { action: "verify", .. }));
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_message_for_other_nonce_is_stale() {
        let adapter = adapter(Arc::new(ScriptedBackend::accepting()));
        let signer = signer();
        adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, Nonce::generate()).await;

        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::StaleNonce));
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticating);
    }

    #[tokio::test]
    async fn test_message_for_other_domain_or_uri_is_refused_locally() {
        let backend = Arc::new(ScriptedBackend::accepting());
        let adapter = adapter(backend.clone());
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();

        let params = MessageParams {
            nonce: nonce.clone(),
            address: signer.address(),
            chain_id: 31337,
        };
        let mut foreign = context();
        foreign.domain = "evil.example".to_string();
        let message = foreign.create_message(&params).unwrap().to_string();
        let signature = signature_hex(&signer.sign_message(&message).await.unwrap());
        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::MessageConstruction(MessageError::InvalidDomain(_))
        ));

        let mut foreign = context();
        foreign.uri = "https://evil.example".to_string();
        let message = foreign.create_message(&params).unwrap().to_string();
        let signature = signature_hex(&signer.sign_message(&message).await.unwrap());
        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::MessageConstruction(MessageError::InvalidUri(_))));

        assert_eq!(backend.verify_calls.load(Ordering::SeqCst), 0);
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticating);

        // The challenge is still answerable with a genuine message.
        let (message, signature) = sign(&adapter, &signer, nonce).await;
        assert!(adapter.verify(&message, &signature).await.unwrap());
    }

    #[tokio::test]
    async fn test_rejection_returns_false_and_resets() {
        let backend = ScriptedBackend::accepting().with_verdict(Ok(Verdict::Rejected {
            reason: "bad signature".into(),
        }));
        let adapter = adapter(Arc::new(backend));
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        assert!(!adapter.verify(&message, &signature).await.unwrap());
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);

        // The challenge was consumed; the same message can't be replayed.
        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_backend_rejection_error_maps_to_false() {
        let backend = ScriptedBackend::accepting()
            .with_verdict(Err(AuthError::VerificationRejected("invalid nonce".into())));
        let adapter = adapter(Arc::new(backend));
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        assert!(!adapter.verify(&message, &signature).await.unwrap());
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_verdict_for_other_address_is_refused() {
        let backend = ScriptedBackend::accepting().with_verdict(Ok(Verdict::Verified {
            address: Address::ZERO,
            token: None,
        }));
        let adapter = adapter(Arc::new(backend));
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        assert!(!adapter.verify(&message, &signature).await.unwrap());
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_network_failure_surfaces_error() {
        let backend = ScriptedBackend::accepting().with_verdict(Err(AuthError::Network("reset".into())));
        let adapter = adapter(Arc::new(backend));
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_nonce_issuance_is_retried() {
        let backend = ScriptedBackend::accepting();
        backend.nonce_failures.store(2, Ordering::SeqCst);
        let adapter = adapter(Arc::new(backend));

        assert!(adapter.get_nonce(signer().address()).await.is_ok());
    }

    #[tokio::test]
    async fn test_nonce_issuance_failure_is_typed() {
        let backend = ScriptedBackend::accepting();
        backend.nonce_failures.store(10, Ordering::SeqCst);
        let adapter = adapter(Arc::new(backend));

        let err = adapter.get_nonce(signer().address()).await.unwrap_err();
        assert!(matches!(err, AuthError::NonceIssuance(_)));
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_get_nonce_while_authenticated_is_invalid() {
        let adapter = adapter(Arc::new(ScriptedBackend::accepting()));
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;
        adapter.verify(&message, &signature).await.unwrap();

        let err = adapter.get_nonce(signer.address()).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidTransition { .. }));
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticated);
    }

    #[tokio::test]
    async fn test_expired_challenge() {
        let adapter = AuthenticationAdapter::new(
            Arc::new(ScriptedBackend::accepting()),
            context(),
            RetryPolicy::none(),
            Duration::from_secs(5),
            Duration::ZERO,
        );
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        let err = adapter.verify(&message, &signature).await.unwrap_err();
        assert!(matches!(err, AuthError::NonceExpired));
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_late_verdict_after_new_nonce_is_discarded() {
        let gate = Arc::new(Notify::new());
        let mut backend = ScriptedBackend::accepting();
        backend.gate = Some(gate.clone());
        let adapter = Arc::new(adapter(Arc::new(backend)));
        let signer = signer();

        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;

        let pending = {
            let adapter = adapter.clone();
            tokio::spawn(async move { adapter.verify(&message, &signature).await })
        };
        tokio::task::yield_now().await;

        // A new challenge is issued while the first verification is in flight.
        adapter.get_nonce(signer.address()).await.unwrap();
        gate.notify_one();

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, AuthError::StaleNonce));
        assert_eq!(adapter.status(), AuthenticationStatus::Authenticating);
    }

    #[tokio::test]
    async fn test_sign_out_clears_status_even_when_backend_fails() {
        let mut backend = ScriptedBackend::accepting();
        backend.fail_sign_out = true;
        let backend = Arc::new(backend);
        let adapter = adapter(backend.clone());
        let signer = signer();
        let nonce = adapter.get_nonce(signer.address()).await.unwrap();
        let (message, signature) = sign(&adapter, &signer, nonce).await;
        adapter.verify(&message, &signature).await.unwrap();

        assert!(adapter.sign_out().await.is_err());
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);
        assert!(adapter.session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_from_any_status() {
        let backend = Arc::new(ScriptedBackend::accepting());
        let adapter = adapter(backend.clone());

        adapter.sign_out().await.unwrap();
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);

        adapter.get_nonce(signer().address()).await.unwrap();
        adapter.sign_out().await.unwrap();
        assert_eq!(adapter.status(), AuthenticationStatus::Unauthenticated);

        // No session existed, so the backend was never bothered.
        assert_eq!(backend.sign_out_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let adapter = adapter(Arc::new(ScriptedBackend::accepting()));
        let mut rx = adapter.subscribe();
        assert_eq!(*rx.borrow(), AuthenticationStatus::Unauthenticated);

        adapter.get_nonce(signer().address()).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthenticationStatus::Authenticating);
    }

    #[test]
    fn test_create_message_failure_is_typed() {
        let mut ctx = context();
        ctx.version = "9".to_string();
        let adapter = AuthenticationAdapter::new(
            Arc::new(ScriptedBackend::accepting()),
            ctx,
            RetryPolicy::none(),
            Duration::from_secs(1),
            Duration::from_secs(1),
        );
        let err = adapter
            .create_message(&MessageParams {
                nonce: Nonce::generate(),
                address: Address::ZERO,
                chain_id: 1,
            })
            .unwrap_err();
        assert!(matches!(err, AuthError::MessageConstruction(_)));
    }
}
