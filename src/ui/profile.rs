//! Profile dashboard sample data.
//!
//! The dashboard renders fixed figures; nothing here is read from a chain.

use serde::Serialize;

/// Display name on the profile header.
pub const PROFILE_NAME: &str = "Alex Chen";

/// Shortened address on the profile header.
pub const PROFILE_ADDRESS: &str = "0x742d...7e8f";

/// One balance card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceCard {
    pub title: &'static str,
    pub value: &'static str,
    pub caption: &'static str,
}

/// The three balance cards on the dashboard.
pub fn balance_cards() -> [BalanceCard; 3] {
    [
        BalanceCard {
            title: "Total Balance",
            value: "$24,850",
            caption: "+12.5% this month",
        },
        BalanceCard {
            title: "Crypto Holdings",
            value: "3.24 ETH",
            caption: "≈ $12,450",
        },
        BalanceCard {
            title: "NFT Portfolio",
            value: "12 NFTs",
            caption: "≈ $12,400",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NftItem {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub price: &'static str,
    pub rarity: Rarity,
}

/// Total items in the collection; the grid only shows a few.
pub const COLLECTION_SIZE: usize = 12;

pub fn collection_caption() -> String {
    format!("{} items in collection", COLLECTION_SIZE)
}

pub fn sample_nfts() -> Vec<NftItem> {
    vec![
        NftItem {
            id: 1,
            name: "Digital Canvas #427",
            image: "/digital-art-nft-purple.jpg",
            price: "2.5 ETH",
            rarity: Rarity::Rare,
        },
        NftItem {
            id: 2,
            name: "Pixel Dreams",
            image: "/pixel-art-nft-colorful.jpg",
            price: "1.8 ETH",
            rarity: Rarity::Common,
        },
        NftItem {
            id: 3,
            name: "Abstract Genesis",
            image: "/abstract-nft-blue.jpg",
            price: "3.2 ETH",
            rarity: Rarity::Legendary,
        },
        NftItem {
            id: 4,
            name: "Cyber Punk #89",
            image: "/cyberpunk-nft-digital.jpg",
            price: "1.4 ETH",
            rarity: Rarity::Uncommon,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Received,
    Sent,
    Nft,
}

impl TxKind {
    /// Icon glyph in the history list.
    pub fn glyph(self) -> char {
        match self {
            TxKind::Received => '↓',
            TxKind::Nft => '◆',
            TxKind::Sent => '↑',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Completed,
    Pending,
}

impl TxStatus {
    pub fn label(self) -> &'static str {
        match self {
            TxStatus::Completed => "Done",
            TxStatus::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: u32,
    pub kind: TxKind,
    pub title: &'static str,
    pub amount: &'static str,
    pub timestamp: &'static str,
    pub status: TxStatus,
}

pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            kind: TxKind::Received,
            title: "Received ETH",
            amount: "+0.5 ETH",
            timestamp: "2 hours ago",
            status: TxStatus::Completed,
        },
        Transaction {
            id: 2,
            kind: TxKind::Sent,
            title: "Sent to wallet",
            amount: "-0.2 ETH",
            timestamp: "5 hours ago",
            status: TxStatus::Completed,
        },
        Transaction {
            id: 3,
            kind: TxKind::Nft,
            title: "NFT Purchase",
            amount: "-2.1 ETH",
            timestamp: "1 day ago",
            status: TxStatus::Completed,
        },
        Transaction {
            id: 4,
            kind: TxKind::Received,
            title: "Staking Reward",
            amount: "+0.05 ETH",
            timestamp: "2 days ago",
            status: TxStatus::Completed,
        },
        Transaction {
            id: 5,
            kind: TxKind::Sent,
            title: "Bridge Transfer",
            amount: "-1.0 ETH",
            timestamp: "3 days ago",
            status: TxStatus::Pending,
        },
    ]
}
