//! Known EVM chains the wallet connector can be configured for.

use serde::Serialize;

/// Hardhat's local development chain id.
pub const HARDHAT_CHAIN_ID: u64 = 31337;

/// A chain the wallet connector may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub native_currency: &'static str,
    pub rpc_url: &'static str,
    pub testnet: bool,
}

const CATALOGUE: [Chain; 5] = [
    Chain {
        id: HARDHAT_CHAIN_ID,
        name: "Hardhat",
        native_currency: "ETH",
        rpc_url: "http://127.0.0.1:8545",
        testnet: true,
    },
    Chain {
        id: 1,
        name: "Ethereum",
        native_currency: "ETH",
        rpc_url: "https://eth.merkle.io",
        testnet: false,
    },
    Chain {
        id: 11155111,
        name: "Sepolia",
        native_currency: "ETH",
        rpc_url: "https://rpc.sepolia.org",
        testnet: true,
    },
    Chain {
        id: 137,
        name: "Polygon",
        native_currency: "POL",
        rpc_url: "https://polygon-rpc.com",
        testnet: false,
    },
    Chain {
        id: 8453,
        name: "Base",
        native_currency: "ETH",
        rpc_url: "https://mainnet.base.org",
        testnet: false,
    },
];

impl Chain {
    /// Look a chain up by its EIP-155 id.
    pub fn by_id(id: u64) -> Option<Chain> {
        CATALOGUE.iter().find(|c| c.id == id).copied()
    }

    /// Every chain in the catalogue.
    pub fn all() -> &'static [Chain] {
        &CATALOGUE
    }

    /// Hardhat local node.
    pub fn hardhat() -> Chain {
        CATALOGUE[0]
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
