//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known chain ids)
//! - Check that URLs and the SIWE domain are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: JibeConfig → Result<(), Vec<ValidationError>>
//! - The project id is checked at provider mount, not here, so that tooling
//!   can run without a credential

use std::fmt;

use crate::config::schema::{AuthMode, JibeConfig};
use crate::wallet::chains::Chain;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for '{}': {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &JibeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.wallet.app_name.trim().is_empty() {
        errors.push(ValidationError::new("wallet.app_name", "must not be empty"));
    }

    if config.wallet.chains.is_empty() {
        errors.push(ValidationError::new("wallet.chains", "at least one chain is required"));
    }
    for id in &config.wallet.chains {
        if Chain::by_id(*id).is_none() {
            errors.push(ValidationError::new(
                "wallet.chains",
                format!("unknown chain id {}", id),
            ));
        }
    }

    let auth = &config.auth;
    if auth.domain.is_empty() || auth.domain.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            "auth.domain",
            "must be a non-empty authority without whitespace",
        ));
    }
    if url::Url::parse(&auth.uri).is_err() {
        errors.push(ValidationError::new("auth.uri", format!("'{}' is not a valid URI", auth.uri)));
    }
    if auth.version != "1" {
        errors.push(ValidationError::new("auth.version", "only version \"1\" is supported"));
    }
    if let Some(statement) = &auth.statement {
        if statement.trim().is_empty() {
            errors.push(ValidationError::new(
                "auth.statement",
                "must not be blank; omit it to sign without a statement",
            ));
        } else if statement.contains('\n') {
            errors.push(ValidationError::new("auth.statement", "must be a single line"));
        }
    }
    if auth.mode == AuthMode::Remote && url::Url::parse(&auth.backend_url).is_err() {
        errors.push(ValidationError::new(
            "auth.backend_url",
            format!("'{}' is not a valid URL", auth.backend_url),
        ));
    }
    if auth.request_timeout_secs == 0 {
        errors.push(ValidationError::new("auth.request_timeout_secs", "must be greater than 0"));
    }
    if auth.nonce_ttl_secs == 0 {
        errors.push(ValidationError::new("auth.nonce_ttl_secs", "must be greater than 0"));
    }

    let retries = &config.retries;
    if retries.enabled && retries.max_attempts == 0 {
        errors.push(ValidationError::new("retries.max_attempts", "must be at least 1"));
    }
    if retries.max_delay_ms < retries.base_delay_ms {
        errors.push(ValidationError::new(
            "retries.max_delay_ms",
            "must not be smaller than base_delay_ms",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
