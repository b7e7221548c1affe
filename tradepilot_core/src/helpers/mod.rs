pub mod dto;

pub use dto::RestResponse;
