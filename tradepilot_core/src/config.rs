use std::env;

const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_STREAM_URL: &str = "ws://localhost:8080/ws/portfolio";

/// Endpoints the client talks to. All API paths are joined onto
/// `api_url`; the portfolio stream has its own URL since it speaks
/// ws/wss rather than http.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub stream_url: String,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, stream_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            stream_url: stream_url.into(),
        }
    }

    /// Reads `API_URL` and `PORTFOLIO_STREAM_URL`, falling back to the
    /// development server.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            api_url: env::var("API_URL").unwrap_or(DEFAULT_API_URL.to_string()),
            stream_url: env::var("PORTFOLIO_STREAM_URL").unwrap_or(DEFAULT_STREAM_URL.to_string()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_STREAM_URL)
    }
}
