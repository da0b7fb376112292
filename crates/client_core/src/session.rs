use std::{fmt, sync::Arc};

use storage::KeyValueStore;
use tracing::info;

use crate::error::ClientError;

pub const TOKEN_STORAGE_KEY: &str = "token";

/// The bearer token for the current user, mirrored into client-local storage
/// under [`TOKEN_STORAGE_KEY`]. At most one token is held at a time.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Loads whatever token a previous run left behind.
    pub async fn restore(store: Arc<dyn KeyValueStore>) -> Result<Self, ClientError> {
        let token = store
            .get_item(TOKEN_STORAGE_KEY)
            .await
            .map_err(ClientError::Storage)?
            .filter(|token| !token.is_empty());
        Ok(Self { store, token })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Replaces any held token. The in-memory copy only changes once the
    /// store accepted the write.
    pub async fn login(&mut self, token: impl Into<String>) -> Result<(), ClientError> {
        let token = token.into();
        self.store
            .set_item(TOKEN_STORAGE_KEY, &token)
            .await
            .map_err(ClientError::Storage)?;
        self.token = Some(token);
        info!("session token stored");
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.store
            .remove_item(TOKEN_STORAGE_KEY)
            .await
            .map_err(ClientError::Storage)?;
        self.token = None;
        info!("session token cleared");
        Ok(())
    }
}
