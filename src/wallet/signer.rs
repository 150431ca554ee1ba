//! Development signer for sign-in messages.
//!
//! # Security
//! - Private keys are loaded ONLY from arguments or environment variables
//! - Keys are never logged or serialized
//! - Meant for local development and tests; production users sign in their
//!   own wallet

use alloy::primitives::{Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use thiserror::Error;

/// Environment variable name for the development private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "JIBE_DEV_PRIVATE_KEY";

/// Anvil's first well-known account key. Public knowledge; never fund it.
pub const ANVIL_TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Errors raised by the development signer.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Message signing failed: {0}")]
    Signing(String),
}

/// Local private-key signer producing EIP-191 personal-message signatures.
#[derive(Debug, Clone)]
pub struct DevSigner {
    signer: PrivateKeySigner,
}

impl DevSigner {
    /// Create a signer from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SignerError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignerError::InvalidKey(format!("{}", e)))?;

        tracing::info!(address = %signer.address(), "Development signer initialized");
        Ok(Self { signer })
    }

    /// Load the signer from `JIBE_DEV_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self, SignerError> {
        let private_key =
            std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| SignerError::MissingEnv(PRIVATE_KEY_ENV_VAR))?;
        Self::from_private_key(&private_key)
    }

    /// A throwaway signer with a random key.
    pub fn random() -> Self {
        Self {
            signer: PrivateKeySigner::random(),
        }
    }

    /// The signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a sign-in message (Ethereum personal-message prefix applied).
    pub async fn sign_message(&self, message: &str) -> Result<Signature, SignerError> {
        self.signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SignerError::Signing(e.to_string()))
    }
}

/// Hex encoding the wallet-connect layer hands to `verify`.
pub fn signature_hex(signature: &Signature) -> String {
    alloy::hex::encode_prefixed(signature.as_bytes())
}
