//! Sign-in-with-Ethereum (EIP-4361) messages.
//!
//! Building is a pure function of its inputs: the same context, address,
//! chain id and nonce always render to the same text. `Issued At` and the
//! other time fields are only emitted when explicitly set.
//!
//! ```text
//! {domain} wants you to sign in with your Ethereum account:
//! {address}
//!
//! {statement}
//!
//! URI: {uri}
//! Version: {version}
//! Chain ID: {chain_id}
//! Nonce: {nonce}
//! Issued At: {issued_at}
//! ```

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::auth::types::Nonce;
use crate::config::AuthConfig;

const PREAMBLE_SUFFIX: &str = " wants you to sign in with your Ethereum account:";

/// Errors raised while building or parsing a sign-in message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("invalid domain '{0}'")]
    InvalidDomain(String),

    #[error("invalid URI '{0}'")]
    InvalidUri(String),

    #[error("unsupported version '{0}'")]
    UnsupportedVersion(String),

    #[error("chain id must be non-zero")]
    InvalidChainId,

    #[error("invalid nonce '{0}': need at least 8 alphanumeric characters")]
    InvalidNonce(String),

    #[error("statement must be a single non-blank line")]
    InvalidStatement,

    #[error("invalid address '{0}': expected an EIP-55 checksummed address")]
    InvalidAddress(String),

    #[error("invalid timestamp for {field}: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("malformed message: {0}")]
    Malformed(String),
}

/// Fixed parts of every message an adapter produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub domain: String,
    pub uri: String,
    pub statement: Option<String>,
    pub version: String,
}

impl MessageContext {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            domain: config.domain.clone(),
            uri: config.uri.clone(),
            statement: config.statement.clone(),
            version: config.version.clone(),
        }
    }

    /// Build the message the wallet will be asked to sign.
    pub fn create_message(&self, params: &MessageParams) -> Result<SiweMessage, MessageError> {
        let message = SiweMessage {
            domain: self.domain.clone(),
            address: params.address,
            statement: self.statement.clone(),
            uri: self.uri.clone(),
            version: self.version.clone(),
            chain_id: params.chain_id,
            nonce: params.nonce.clone(),
            issued_at: None,
            expiration_time: None,
            not_before: None,
            request_id: None,
            resources: Vec::new(),
        };
        message.validate()?;
        Ok(message)
    }
}

/// Per-attempt inputs supplied by the wallet-connect flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageParams {
    pub nonce: Nonce,
    pub address: Address,
    pub chain_id: u64,
}

/// A parsed or constructed EIP-4361 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweMessage {
    pub domain: String,
    pub address: Address,
    pub statement: Option<String>,
    pub uri: String,
    pub version: String,
    pub chain_id: u64,
    pub nonce: Nonce,
    pub issued_at: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub not_before: Option<DateTime<Utc>>,
    pub request_id: Option<String>,
    pub resources: Vec<String>,
}

impl SiweMessage {
    /// Check the semantic rules a well-formed message must satisfy.
    pub fn validate(&self) -> Result<(), MessageError> {
        if self.domain.is_empty() || self.domain.chars().any(char::is_whitespace) {
            return Err(MessageError::InvalidDomain(self.domain.clone()));
        }
        if url::Url::parse(&self.uri).is_err() {
            return Err(MessageError::InvalidUri(self.uri.clone()));
        }
        if self.version != "1" {
            return Err(MessageError::UnsupportedVersion(self.version.clone()));
        }
        if self.chain_id == 0 {
            return Err(MessageError::InvalidChainId);
        }
        if let Some(statement) = &self.statement {
            if statement.trim().is_empty() || statement.contains('\n') {
                return Err(MessageError::InvalidStatement);
            }
        }
        if let Some(request_id) = &self.request_id {
            if request_id.contains('\n') {
                return Err(MessageError::Malformed("request id spans lines".to_string()));
            }
        }
        for resource in &self.resources {
            if url::Url::parse(resource).is_err() {
                return Err(MessageError::InvalidUri(resource.clone()));
            }
        }
        Ok(())
    }

    /// True once `now` is at or past the expiration time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|exp| now >= exp)
    }

    /// True while `now` is before the not-before time.
    pub fn is_premature_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before.is_some_and(|nbf| now < nbf)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MessageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| MessageError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

impl fmt::Display for SiweMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}\n{}\n\n",
            self.domain,
            PREAMBLE_SUFFIX,
            self.address.to_checksum(None)
        )?;
        if let Some(statement) = &self.statement {
            writeln!(f, "{}", statement)?;
        }
        write!(
            f,
            "\nURI: {}\nVersion: {}\nChain ID: {}\nNonce: {}",
            self.uri, self.version, self.chain_id, self.nonce
        )?;
        if let Some(ts) = &self.issued_at {
            write!(f, "\nIssued At: {}", format_timestamp(ts))?;
        }
        if let Some(ts) = &self.expiration_time {
            write!(f, "\nExpiration Time: {}", format_timestamp(ts))?;
        }
        if let Some(ts) = &self.not_before {
            write!(f, "\nNot Before: {}", format_timestamp(ts))?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, "\nRequest ID: {}", request_id)?;
        }
        if !self.resources.is_empty() {
            write!(f, "\nResources:")?;
            for resource in &self.resources {
                write!(f, "\n- {}", resource)?;
            }
        }
        Ok(())
    }
}

/// Cursor over message lines.
struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        let mut lines: Vec<&str> = text.split('\n').collect();
        // Tolerate a single trailing newline.
        if lines.len() > 1 && lines.last() == Some(&"") {
            lines.pop();
        }
        Self { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    fn expect_blank(&mut self) -> Result<(), MessageError> {
        match self.next() {
            Some("") => Ok(()),
            Some(other) => Err(MessageError::Malformed(format!("expected blank line, found '{}'", other))),
            None => Err(MessageError::Malformed("unexpected end of message".to_string())),
        }
    }

    fn field(&mut self, tag: &'static str) -> Result<&'a str, MessageError> {
        self.optional_field(tag).ok_or(MessageError::MissingField(tag))
    }

    fn optional_field(&mut self, tag: &'static str) -> Option<&'a str> {
        let value = self
            .peek()?
            .strip_prefix(tag)
            .and_then(|rest| rest.strip_prefix(": "))?;
        self.pos += 1;
        Some(value)
    }
}

impl FromStr for SiweMessage {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = Lines::new(s);

        let domain = lines
            .next()
            .and_then(|line| line.strip_suffix(PREAMBLE_SUFFIX))
            .ok_or_else(|| MessageError::Malformed("missing sign-in preamble".to_string()))?
            .to_string();

        let raw_address = lines.next().ok_or(MessageError::MissingField("address"))?;
        let address = Address::parse_checksummed(raw_address, None)
            .map_err(|_| MessageError::InvalidAddress(raw_address.to_string()))?;

        lines.expect_blank()?;
        let statement = match lines.next() {
            Some("") => None,
            Some(statement) => {
                lines.expect_blank()?;
                Some(statement.to_string())
            }
            None => return Err(MessageError::MissingField("URI")),
        };

        let uri = lines.field("URI")?.to_string();
        let version = lines.field("Version")?.to_string();
        let raw_chain_id = lines.field("Chain ID")?;
        let chain_id = raw_chain_id
            .parse::<u64>()
            .map_err(|_| MessageError::Malformed(format!("chain id '{}' is not a number", raw_chain_id)))?;
        let nonce: Nonce = lines.field("Nonce")?.parse()?;

        let issued_at = lines
            .optional_field("Issued At")
            .map(|v| parse_timestamp("Issued At", v))
            .transpose()?;
        let expiration_time = lines
            .optional_field("Expiration Time")
            .map(|v| parse_timestamp("Expiration Time", v))
            .transpose()?;
        let not_before = lines
            .optional_field("Not Before")
            .map(|v| parse_timestamp("Not Before", v))
            .transpose()?;
        let request_id = lines.optional_field("Request ID").map(str::to_string);

        let mut resources = Vec::new();
        if lines.peek() == Some("Resources:") {
            lines.next();
            while let Some(resource) = lines.peek().and_then(|line| line.strip_prefix("- ")) {
                resources.push(resource.to_string());
                lines.next();
            }
        }

        if let Some(extra) = lines.next() {
            return Err(MessageError::Malformed(format!("unexpected line '{}'", extra)));
        }

        let message = SiweMessage {
            domain,
            address,
            statement,
            uri,
            version,
            chain_id,
            nonce,
            issued_at,
            expiration_time,
            not_before,
            request_id,
            resources,
        };
        message.validate()?;
        Ok(message)
    }
}
