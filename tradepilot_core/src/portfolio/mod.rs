pub mod dto;
pub mod stream;

pub use dto::{CoinHolding, ExchangeHolding, PortfolioSnapshot, WalletHolding};
pub use stream::{PortfolioStream, StreamEvent, StreamState};
