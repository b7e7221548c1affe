use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
    pub local_currency: String,
}

/// Transaction row as served by the history endpoints. Amounts arrive
/// pre-formatted as strings in the user's local currency conventions;
/// the authoritative copy is server-side and only `category` is ever
/// written back, through its own round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: String,
    pub network: String,
    pub network_display_name: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub currency_pair: Option<CurrencyPair>,
    pub quantity: String,
    pub quantity_currency: String,
    pub fiat_quantity: String,
    pub fiat_quantity_currency: String,
    pub price: String,
    pub price_currency: String,
    pub fiat_price: String,
    pub fiat_price_currency: String,
    pub quote_fiat_price: String,
    pub quote_fiat_price_currency: String,
    pub fee: String,
    pub fee_currency: String,
    pub fiat_fee: String,
    pub fiat_fee_currency: String,
    pub total: String,
    pub total_currency: String,
    pub fiat_total: String,
    pub fiat_total_currency: String,
}
