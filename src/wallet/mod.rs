//! Wallet-connect provider and local signing.
//!
//! # Data Flow
//! ```text
//! JibeConfig
//!     → ProviderBootstrap::mount(Client)
//!         → WalletConfig (chains resolved against chains.rs)
//!         → AuthenticationAdapter (when enable_authentication)
//!     → Arc<WalletProvider> (built once, shared)
//! ```
//!
//! `DevSigner` signs sign-in messages with a local key for development and
//! tests; real users sign in their own wallet.

pub mod chains;
pub mod provider;
pub mod signer;

pub use chains::Chain;
pub use provider::{ProviderBootstrap, ProviderError, RenderEnvironment, WalletConfig, WalletProvider};
pub use signer::{DevSigner, SignerError};
