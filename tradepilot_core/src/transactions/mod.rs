pub mod dto;
pub mod handler;

pub use dto::{CurrencyPair, Transaction};
pub use handler::TransactionService;
