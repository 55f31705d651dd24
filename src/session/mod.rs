pub mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

use crate::error::{FavoritesError, FavoritesResult};
use crate::models::UserSession;
use std::sync::Arc;
use tracing::{info, warn};

/// Storage key holding the signed-in user's JSON
pub const USER_KEY: &str = "user";

/// Reads and writes the current [`UserSession`]
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The stored session, or `None` when signed out.
    ///
    /// Unparseable JSON or a blank email counts as signed out.
    pub async fn current(&self) -> FavoritesResult<Option<UserSession>> {
        let Some(raw) = self.storage.get(USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserSession>(&raw) {
            Ok(session) if !session.email.trim().is_empty() => Ok(Some(session)),
            Ok(_) => {
                warn!("Stored session has no email, treating as signed out");
                Ok(None)
            }
            Err(e) => {
                warn!("Stored session is not valid JSON ({}), treating as signed out", e);
                Ok(None)
            }
        }
    }

    /// Like [`current`](Self::current) but fails with `NotAuthenticated`.
    pub async fn require(&self) -> FavoritesResult<UserSession> {
        self.current().await?.ok_or(FavoritesError::NotAuthenticated)
    }

    pub async fn login(&self, session: &UserSession) -> FavoritesResult<()> {
        let raw = serde_json::to_string(session)
            .map_err(|e| FavoritesError::Storage(e.to_string()))?;
        self.storage.set(USER_KEY, &raw).await?;
        info!("Signed in as {}", session.email);
        Ok(())
    }

    pub async fn logout(&self) -> FavoritesResult<()> {
        self.storage.remove(USER_KEY).await?;
        info!("Signed out");
        Ok(())
    }
}
