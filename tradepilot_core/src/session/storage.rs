use sled::{Db, Tree};

use crate::error::ClientError;

const TREE_NAME: &str = "session";
const TOKEN_KEY: &str = "id_token";

/// Durable home of the bearer token. Exactly one key lives here; every
/// write replaces the value whole. Injected into [`SessionClient`] so
/// tests can hand it a throwaway database.
///
/// [`SessionClient`]: crate::session::handler::SessionClient
#[derive(Clone)]
pub struct SessionStore {
    tree: Tree,
}

impl SessionStore {
    pub fn new(db: &Db) -> sled::Result<Self> {
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self { tree })
    }

    pub fn token(&self) -> Result<Option<String>, ClientError> {
        let value = self.tree.get(TOKEN_KEY)?;
        Ok(value.map(|raw| String::from_utf8_lossy(&raw).into_owned()))
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.tree.insert(TOKEN_KEY, token.as_bytes())?;
        Ok(())
    }

    /// Removing an absent key is fine, so this is idempotent.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.tree.remove(TOKEN_KEY)?;
        Ok(())
    }
}
