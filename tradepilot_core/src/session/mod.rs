pub mod claims;
pub mod dto;
pub mod handler;
pub mod storage;

pub use dto::{Claims, RegistrationResult, Session, UserIdentity};
pub use handler::SessionClient;
pub use storage::SessionStore;
