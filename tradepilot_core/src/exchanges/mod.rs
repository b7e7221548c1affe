pub mod dto;
pub mod handler;

pub use dto::{NewExchange, UserExchange};
pub use handler::ExchangeService;
