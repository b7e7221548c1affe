//! Client engine for the tradepilot dashboard: bearer-token session
//! management, the authenticated API surface, and the live portfolio
//! stream. Rendering lives elsewhere; this crate only promises that
//! everything it publishes is safe to iterate.

pub mod config;
pub mod error;
pub mod exchanges;
pub mod helpers;
pub mod portfolio;
pub mod session;
pub mod transactions;

pub use config::ClientConfig;
pub use error::ClientError;
pub use helpers::dto::RestResponse;
pub use portfolio::dto::PortfolioSnapshot;
pub use portfolio::stream::{PortfolioStream, StreamEvent, StreamState};
pub use session::dto::{Claims, Session, UserIdentity};
pub use session::handler::SessionClient;
pub use session::storage::SessionStore;
