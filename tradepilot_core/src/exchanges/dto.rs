use serde::{Deserialize, Serialize};

/// An exchange account as echoed back by the server. The API secret is
/// write-only; it never appears in responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserExchange {
    pub id: String,
    pub name: String,
    pub url: String,
    pub key: String,
    pub extra: String,
}

/// Form fields for registering an exchange account. `extra` carries
/// whatever third credential the exchange wants (passphrase, client
/// id); empty when unused.
#[derive(Debug, Clone)]
pub struct NewExchange {
    pub name: String,
    pub key: String,
    pub secret: String,
    pub extra: String,
}
