//! jibe client core: wallet-connect bootstrap, Sign-In with Ethereum, and
//! the UI-local state of the creator-community front-end.

// Core subsystems
pub mod auth;
pub mod config;
pub mod wallet;

// Presentation state
pub mod ui;

// Cross-cutting concerns
pub mod observability;
pub mod resilience;

pub use auth::{AuthError, AuthenticationAdapter, AuthenticationStatus};
pub use config::JibeConfig;
pub use wallet::{ProviderBootstrap, RenderEnvironment, WalletProvider};
