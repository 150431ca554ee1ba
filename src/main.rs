//! jibe command-line client.
//!
//! # Commands
//!
//! ```text
//! jibe config                       print the effective configuration
//! jibe message --address .. --chain-id ..   render a sign-in message
//! jibe sign-in [--private-key ..]   run the full sign-in flow with a local key
//! jibe profile                      dump the profile dashboard sample data
//! ```

use std::path::PathBuf;

use alloy::primitives::Address;
use clap::{Parser, Subcommand};

use jibe::auth::{MessageContext, MessageParams, Nonce};
use jibe::config::load_or_default;
use jibe::observability::{init_logging, metrics};
use jibe::ui::profile;
use jibe::wallet::chains::HARDHAT_CHAIN_ID;
use jibe::wallet::signer::signature_hex;
use jibe::wallet::DevSigner;
use jibe::{ProviderBootstrap, RenderEnvironment};

#[derive(Parser)]
#[command(name = "jibe")]
#[command(about = "Wallet sign-in client for the jibe creator community", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as TOML
    Config,
    /// Render the sign-in message for an address
    Message {
        #[arg(long)]
        address: Address,
        #[arg(long, default_value_t = HARDHAT_CHAIN_ID)]
        chain_id: u64,
        /// Nonce to embed; a fresh one is generated when omitted
        #[arg(long)]
        nonce: Option<Nonce>,
    },
    /// Sign in with a local development key
    SignIn {
        /// Hex private key; falls back to JIBE_DEV_PRIVATE_KEY
        #[arg(long)]
        private_key: Option<String>,
        /// Sign out again once verified
        #[arg(long)]
        sign_out: bool,
    },
    /// Print the profile dashboard sample data as JSON
    Profile,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    init_logging(&config.observability);
    metrics::set_enabled(config.observability.metrics_enabled);

    match cli.command {
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Message {
            address,
            chain_id,
            nonce,
        } => {
            let context = MessageContext::from_config(&config.auth);
            let message = context.create_message(&MessageParams {
                nonce: nonce.unwrap_or_else(Nonce::generate),
                address,
                chain_id,
            })?;
            println!("{}", message);
        }
        Commands::SignIn {
            private_key,
            sign_out,
        } => {
            let signer = match private_key {
                Some(key) => DevSigner::from_private_key(&key)?,
                None => DevSigner::from_env()?,
            };

            let bootstrap = ProviderBootstrap::new(config);
            let provider = bootstrap
                .mount(RenderEnvironment::Client)?
                .ok_or("wallet provider did not mount")?;
            let adapter = provider
                .auth()
                .ok_or("authentication is disabled (wallet.enable_authentication = false)")?;
            let chain_id = provider
                .config()
                .chains
                .first()
                .map(|c| c.id)
                .unwrap_or(HARDHAT_CHAIN_ID);

            let nonce = adapter.get_nonce(signer.address()).await?;
            let message = adapter
                .create_message(&MessageParams {
                    nonce,
                    address: signer.address(),
                    chain_id,
                })?
                .to_string();
            let signature = signer.sign_message(&message).await?;

            let verified = adapter.verify(&message, &signature_hex(&signature)).await?;
            println!("{}", message);
            println!();
            println!("status: {}", adapter.status());
            if let Some(session) = adapter.session() {
                println!("session: {} ({})", session.id, session.address);
            }

            if verified && sign_out {
                adapter.sign_out().await?;
                println!("status: {}", adapter.status());
            }
            if !verified {
                return Err("sign-in was rejected".into());
            }
        }
        Commands::Profile => {
            let dump = serde_json::json!({
                "name": profile::PROFILE_NAME,
                "address": profile::PROFILE_ADDRESS,
                "balances": profile::balance_cards(),
                "nfts": profile::sample_nfts(),
                "collection": profile::collection_caption(),
                "transactions": profile::sample_transactions(),
            });
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }

    Ok(())
}
