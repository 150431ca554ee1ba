//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → JibeConfig (validated, immutable)
//!     → handed to ProviderBootstrap, which builds the wallet provider once
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AuthConfig;
pub use schema::AuthMode;
pub use schema::JibeConfig;
pub use schema::ObservabilityConfig;
pub use schema::RetryConfig;
pub use schema::WalletSettings;
