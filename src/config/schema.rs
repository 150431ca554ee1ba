//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client core.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct JibeConfig {
    /// Wallet-connect provider settings.
    pub wallet: WalletSettings,

    /// Sign-in-with-Ethereum settings.
    pub auth: AuthConfig,

    /// Retry configuration for backend calls.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Wallet-connect provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalletSettings {
    /// Application name shown by the wallet during connection.
    pub app_name: String,

    /// Wallet-connect project identifier.
    ///
    /// Usually left empty in the file and supplied through `JIBE_PROJECT_ID`.
    pub project_id: String,

    /// Supported chain ids.
    pub chains: Vec<u64>,

    /// Whether the host renders on the server first.
    pub ssr: bool,

    /// Attach the sign-in adapter to the provider.
    pub enable_authentication: bool,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            app_name: "jibe".to_string(),
            project_id: String::new(),
            chains: vec![31337],
            ssr: true,
            enable_authentication: true,
        }
    }
}

/// Where signatures get verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Forward to the verification backend over HTTP.
    Remote,
    /// Verify in-process. Local development only.
    Local,
}

/// Sign-in-with-Ethereum configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Verification mode.
    pub mode: AuthMode,

    /// Base URL of the verification backend's auth routes.
    pub backend_url: String,

    /// RFC 3986 authority requesting the signature (e.g., "app.example.com").
    pub domain: String,

    /// URI the sign-in refers to.
    pub uri: String,

    /// Human-readable statement embedded in the message.
    pub statement: Option<String>,

    /// SIWE message version. Only "1" exists.
    pub version: String,

    /// Per-request timeout for backend calls in seconds.
    pub request_timeout_secs: u64,

    /// How long an issued nonce stays usable, in seconds.
    pub nonce_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Remote,
            backend_url: "http://localhost:8080/v1/auth".to_string(),
            domain: "localhost:3000".to_string(),
            uri: "http://localhost:3000".to_string(),
            statement: Some("Sign in to jibe with your Ethereum account.".to_string()),
            version: "1".to_string(),
            request_timeout_secs: 10,
            nonce_ttl_secs: 600,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, first call included.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record auth counters through the metrics facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JibeConfig::default();
        assert_eq!(config.wallet.app_name, "jibe");
        assert_eq!(config.wallet.chains, vec![31337]);
        assert!(config.wallet.enable_authentication);
        assert_eq!(config.auth.mode, AuthMode::Remote);
        assert_eq!(config.auth.version, "1");
        assert_eq!(config.retries.max_attempts, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: JibeConfig = toml::from_str(
            r#"
            [wallet]
            app_name = "creators"

            [auth]
            mode = "local"
            "#,
        )
        .unwrap();

        assert_eq!(config.wallet.app_name, "creators");
        assert!(config.wallet.ssr);
        assert_eq!(config.auth.mode, AuthMode::Local);
        assert_eq!(config.auth.nonce_ttl_secs, 600);
    }
}
