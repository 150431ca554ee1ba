//! Wallet provider bootstrap.
//!
//! The provider bundles the wallet-connect configuration with the sign-in
//! adapter. It is built at most once per process, and only when rendering on
//! the client; server-side rendering gets nothing.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use thiserror::Error;

use crate::auth::{AuthError, AuthenticationAdapter};
use crate::config::JibeConfig;
use crate::wallet::chains::Chain;

/// Where the host is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEnvironment {
    Server,
    Client,
}

/// Errors raised while mounting the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Wallet-connect project id is missing; set wallet.project_id or JIBE_PROJECT_ID")]
    MissingProjectId,

    #[error("Unknown chain id: {0}")]
    UnknownChain(u64),

    #[error("Failed to build authentication adapter: {0}")]
    Auth(#[from] AuthError),
}

/// Resolved wallet-connect configuration.
#[derive(Debug, Clone, Serialize)]
pub struct WalletConfig {
    pub app_name: String,
    pub project_id: String,
    pub chains: Vec<Chain>,
    pub ssr: bool,
}

impl WalletConfig {
    /// Resolve chain ids against the catalogue and require a project id.
    pub fn resolve(settings: &JibeConfig) -> Result<Self, ProviderError> {
        let wallet = &settings.wallet;
        if wallet.project_id.trim().is_empty() {
            return Err(ProviderError::MissingProjectId);
        }
        let chains = wallet
            .chains
            .iter()
            .map(|id| Chain::by_id(*id).ok_or(ProviderError::UnknownChain(*id)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            app_name: wallet.app_name.clone(),
            project_id: wallet.project_id.clone(),
            chains,
            ssr: wallet.ssr,
        })
    }
}

/// The mounted provider: shared for the lifetime of the process.
#[derive(Debug)]
pub struct WalletProvider {
    config: WalletConfig,
    auth: Option<Arc<AuthenticationAdapter>>,
}

impl WalletProvider {
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// The sign-in adapter, when authentication is enabled.
    pub fn auth(&self) -> Option<&Arc<AuthenticationAdapter>> {
        self.auth.as_ref()
    }
}

/// Builds the [`WalletProvider`] once and hands out the shared handle.
#[derive(Debug)]
pub struct ProviderBootstrap {
    settings: JibeConfig,
    cell: Mutex<Option<Arc<WalletProvider>>>,
}

impl ProviderBootstrap {
    pub fn new(settings: JibeConfig) -> Self {
        Self {
            settings,
            cell: Mutex::new(None),
        }
    }

    /// Mount the provider for `environment`.
    ///
    /// Returns `Ok(None)` on the server. On the client the first call builds
    /// the provider; later calls return the same instance.
    pub fn mount(&self, environment: RenderEnvironment) -> Result<Option<Arc<WalletProvider>>, ProviderError> {
        if environment == RenderEnvironment::Server {
            tracing::debug!("Server render; wallet provider not mounted");
            return Ok(None);
        }

        let mut cell = self.cell.lock().expect("provider bootstrap mutex poisoned");
        if let Some(provider) = cell.as_ref() {
            return Ok(Some(Arc::clone(provider)));
        }

        let config = WalletConfig::resolve(&self.settings)?;
        let auth = if self.settings.wallet.enable_authentication {
            let adapter = AuthenticationAdapter::from_config(&self.settings.auth, &self.settings.retries)?;
            Some(Arc::new(adapter))
        } else {
            None
        };

        tracing::info!(
            app_name = %config.app_name,
            chains = config.chains.len(),
            authentication = auth.is_some(),
            "Wallet provider mounted"
        );

        let provider = Arc::new(WalletProvider { config, auth });
        *cell = Some(Arc::clone(&provider));
        Ok(Some(provider))
    }

    /// Whether the provider has been built.
    pub fn is_mounted(&self) -> bool {
        self.cell.lock().expect("provider bootstrap mutex poisoned").is_some()
    }
}
