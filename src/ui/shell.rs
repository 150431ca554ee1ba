//! Navigation chrome state: menu toggle, links, and the connect button.

use alloy::primitives::Address;
use serde::Serialize;

use crate::auth::AuthenticationStatus;

/// A navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Landing-page header links.
pub const HEADER_LINKS: [NavLink; 3] = [
    NavLink { label: "Market", href: "#market" },
    NavLink { label: "Profile", href: "#profile" },
    NavLink { label: "Settings", href: "#" },
];

/// Profile dashboard navbar links.
pub const NAVBAR_LINKS: [NavLink; 4] = [
    NavLink { label: "Profile", href: "/" },
    NavLink { label: "Portfolio", href: "/portfolio" },
    NavLink { label: "Activity", href: "/activity" },
    NavLink { label: "Settings", href: "/settings" },
];

/// Mobile menu open/closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Following a link closes the menu.
    pub fn close(&mut self) {
        self.open = false;
    }
}

/// What the connect button shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConnectAffordance {
    /// No wallet connected.
    Connect,
    /// Wallet connected, sign-in required or in progress.
    SignIn { address: String, pending: bool },
    /// Signed in.
    Account { address: String },
}

impl ConnectAffordance {
    /// Derive the button state from the connected wallet and the sign-in status.
    ///
    /// With authentication disabled, `status` is `None` and a connected
    /// wallet goes straight to the account view.
    pub fn derive(wallet: Option<Address>, status: Option<AuthenticationStatus>) -> Self {
        let Some(address) = wallet else {
            return ConnectAffordance::Connect;
        };
        let address = shorten_address(&address.to_checksum(None));
        match status {
            None | Some(AuthenticationStatus::Authenticated) => ConnectAffordance::Account { address },
            Some(AuthenticationStatus::Authenticating) => ConnectAffordance::SignIn { address, pending: true },
            Some(AuthenticationStatus::Unauthenticated) => ConnectAffordance::SignIn { address, pending: false },
        }
    }

    pub fn label(&self) -> String {
        match self {
            ConnectAffordance::Connect => "Connect Wallet".to_string(),
            ConnectAffordance::SignIn { pending: true, .. } => "Signing in...".to_string(),
            ConnectAffordance::SignIn { pending: false, .. } => "Sign In".to_string(),
            ConnectAffordance::Account { address } => address.clone(),
        }
    }
}

/// Render `0x742d35Cc...` as `0x742d...7e8f`. Short inputs are returned unchanged.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
