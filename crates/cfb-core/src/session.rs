//! Simulated wallet session: connection flag, mock address, token eligibility.

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::random::{self, RandomSource};

/// Fabricated testnet-style addresses handed out on connect.
pub const MOCK_ADDRESSES: [&str; 3] = [
    "ALGO7X2KXQJ5HZQK3MNBV4T6FPJIMWCEQ5GQTM",
    "ALGOB9R4WMCZP8NKDYF3JXQT2LVHAE6UCRGXNH",
    "ALGOC3K7YNDT5XRMHZ4JWQ8BFPEG6AS2CTLVQ9",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_connected: bool,
    pub address: Option<String>,
    pub has_token: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Disconnected,
    Connected,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.is_connected {
            SessionPhase::Connected
        } else {
            SessionPhase::Disconnected
        }
    }
}

pub struct SessionStore {
    state: SessionState,
    pool: Vec<String>,
    rng: Box<dyn RandomSource>,
}

impl SessionStore {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self::with_pool(MOCK_ADDRESSES.iter().map(|s| s.to_string()).collect(), rng)
    }

    /// Use a custom address pool. An empty pool falls back to [`MOCK_ADDRESSES`].
    pub fn with_pool(pool: Vec<String>, rng: Box<dyn RandomSource>) -> Self {
        let pool = if pool.is_empty() {
            MOCK_ADDRESSES.iter().map(|s| s.to_string()).collect()
        } else {
            pool
        };
        Self {
            state: SessionState::default(),
            pool,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected
    }

    pub fn address(&self) -> Option<&str> {
        self.state.address.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.state.has_token
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Connect with a freshly drawn address. Reconnecting re-rolls it.
    pub fn connect(&mut self) -> &SessionState {
        let address = random::choose(self.rng.as_mut(), &self.pool)
            .cloned()
            .unwrap_or_else(|| MOCK_ADDRESSES[0].to_string());
        info!(target: "session", address = %short_address(&address), "wallet connected");
        self.state = SessionState {
            is_connected: true,
            address: Some(address),
            // The simulation never models a wallet without the campus token.
            has_token: true,
        };
        &self.state
    }

    pub fn disconnect(&mut self) -> &SessionState {
        if self.state.is_connected {
            info!(target: "session", "wallet disconnected");
        }
        self.state = SessionState::default();
        &self.state
    }
}

/// Address prefix shown in notices.
pub fn short_address(address: &str) -> String {
    let head: String = address.chars().take(8).collect();
    format!("{head}...")
}
