use serde::{Deserialize, Serialize};

// Wire shapes. The server's JSON marshalling collapses empty
// collections to null, so every sequence arrives as an Option and none
// of these types leave this module.

#[derive(Debug, Deserialize)]
pub(crate) struct PortfolioSnapshotWire {
    #[serde(default)]
    pub net_worth: f64,
    #[serde(default)]
    pub exchanges: Option<Vec<ExchangeHoldingWire>>,
    #[serde(default)]
    pub wallets: Option<Vec<WalletHoldingWire>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExchangeHoldingWire {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub satoshis: f64,
    #[serde(default)]
    pub coins: Option<Vec<CoinHolding>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WalletHoldingWire {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub value: f64,
}

/// Complete replacement state for the portfolio view. Every sequence is
/// a `Vec`, possibly empty, never null; safe for iteration-based
/// rendering without guards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    pub net_worth: f64,
    pub exchanges: Vec<ExchangeHolding>,
    pub wallets: Vec<WalletHolding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeHolding {
    pub name: String,
    pub total: f64,
    pub satoshis: f64,
    pub coins: Vec<CoinHolding>,
}

/// A single holding on an exchange. Deserialized directly; no field of
/// a coin row is collection-valued so nothing needs normalizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinHolding {
    pub currency: String,
    pub balance: f64,
    pub available: f64,
    pub pending: f64,
    pub price: f64,
    pub total: f64,
    pub btc: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletHolding {
    pub currency: String,
    pub address: String,
    pub balance: f64,
    pub value: f64,
}

impl From<PortfolioSnapshotWire> for PortfolioSnapshot {
    fn from(wire: PortfolioSnapshotWire) -> Self {
        Self {
            net_worth: wire.net_worth,
            exchanges: wire
                .exchanges
                .unwrap_or_default()
                .into_iter()
                .map(ExchangeHolding::from)
                .collect(),
            wallets: wire
                .wallets
                .unwrap_or_default()
                .into_iter()
                .map(WalletHolding::from)
                .collect(),
        }
    }
}

impl From<ExchangeHoldingWire> for ExchangeHolding {
    fn from(wire: ExchangeHoldingWire) -> Self {
        Self {
            name: wire.name,
            total: wire.total,
            satoshis: wire.satoshis,
            coins: wire.coins.unwrap_or_default(),
        }
    }
}

impl From<WalletHoldingWire> for WalletHolding {
    fn from(wire: WalletHoldingWire) -> Self {
        Self {
            currency: wire.currency,
            address: wire.address,
            balance: wire.balance,
            value: wire.value,
        }
    }
}
