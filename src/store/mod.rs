//! The favorites cache.
//!
//! [`FavoritesStore`] owns the favorite id list and the matching view-model
//! list for the lifetime of the app session. The backend stays the source of
//! truth; local state can drift until the next [`FavoritesStore::load_favorites`].

mod transaction;

use crate::error::{FavoritesError, FavoritesResult};
use crate::gateway::{FavoritesGateway, RemoteFavorite};
use crate::models::{FavoriteEntry, Property};
use crate::normalizer::{property_id, to_favorite_entry};
use crate::session::SessionManager;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};
use transaction::PendingToggle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Default)]
pub(crate) struct FavoritesState {
    pub(crate) ids: Vec<String>,
    pub(crate) entries: Vec<FavoriteEntry>,
    /// Loads started but not yet settled
    pub(crate) loads_in_flight: usize,
}

impl FavoritesState {
    fn clear(&mut self) {
        self.ids.clear();
        self.entries.clear();
    }
}

pub struct FavoritesStore {
    gateway: Arc<dyn FavoritesGateway>,
    sessions: SessionManager,
    asset_host: String,
    /// Never held across an `.await`
    state: Mutex<FavoritesState>,
    /// Serializes toggle/remove per property id. An entry is dropped once
    /// no operation on that id holds or waits for it.
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl FavoritesStore {
    pub fn new(
        gateway: Arc<dyn FavoritesGateway>,
        sessions: SessionManager,
        asset_host: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            asset_host: asset_host.into(),
            state: Mutex::new(FavoritesState::default()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FavoritesState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn in_flight(&self) -> MutexGuard<'_, HashMap<String, Arc<tokio::sync::Mutex<()>>>> {
        self.in_flight.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn id_lock(&self, id: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.in_flight().entry(id.to_string()).or_default().clone()
    }

    /// Clones only happen under the map lock, so a count of 2 (map + `lock`)
    /// means nobody else holds or waits for this id.
    fn release_id_lock(&self, id: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut in_flight = self.in_flight();
        if Arc::strong_count(&lock) <= 2 {
            in_flight.remove(id);
        }
    }

    /// Replaces both lists with what the backend has.
    ///
    /// Signed out means no favorites. A malformed payload leaves both lists
    /// empty without an error; any other failure clears them and is returned.
    pub async fn load_favorites(&self) -> FavoritesResult<()> {
        self.state().loads_in_flight += 1;
        let result = self.fetch().await;

        let mut state = self.state();
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        match result {
            Ok(favorites) => {
                state.clear();
                for favorite in favorites {
                    let id = favorite.property_id.to_string();
                    let Some(property) = favorite.property else {
                        warn!("Favorite {} has no listing, skipping", id);
                        continue;
                    };
                    if state.ids.contains(&id) {
                        continue;
                    }
                    let entry = to_favorite_entry(&property, id.clone(), &self.asset_host);
                    state.ids.push(id);
                    state.entries.push(entry);
                }
                info!("📋 Loaded {} favorites", state.ids.len());
                Ok(())
            }
            Err(FavoritesError::Malformed(reason)) => {
                warn!("Favorites payload was malformed ({}), showing none", reason);
                state.clear();
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load favorites: {}", e);
                state.clear();
                Err(e)
            }
        }
    }

    async fn fetch(&self) -> FavoritesResult<Vec<RemoteFavorite>> {
        let Some(session) = self.sessions.current().await? else {
            debug!("No session, no favorites to load");
            return Ok(Vec::new());
        };
        self.gateway.list(&session.email).await
    }

    /// Adds or removes `property` and returns whether it is now a favorite.
    ///
    /// Both lists change before the backend call; if the call fails the
    /// change is undone and the error returned. Toggles of the same id run
    /// one after another, each seeing the state the previous one left.
    pub async fn toggle_favorite(&self, property: &Property) -> FavoritesResult<bool> {
        let session = self.sessions.require().await?;
        let id = property_id(property).ok_or(FavoritesError::MissingPropertyId)?;

        let lock = self.id_lock(&id);
        let result = {
            let _guard = lock.lock().await;
            self.toggle_locked(&session.email, &id, property).await
        };
        self.release_id_lock(&id, lock);
        result
    }

    async fn toggle_locked(&self, email: &str, id: &str, property: &Property) -> FavoritesResult<bool> {
        let pending = {
            let entry = to_favorite_entry(property, id.to_string(), &self.asset_host);
            PendingToggle::apply(&mut self.state(), id, entry)
        };
        let added = pending.is_added();

        let result = if added {
            self.gateway.add(email, id, property).await
        } else {
            self.gateway.remove(email, id).await
        };

        match result {
            Ok(()) => {
                info!(
                    "{} favorite {}",
                    if added { "❤️ Added" } else { "Removed" },
                    pending.id()
                );
                Ok(added)
            }
            Err(e) => {
                warn!("Reverting favorite {}: {}", pending.id(), e);
                pending.rollback(&mut self.state());
                Err(e)
            }
        }
    }

    /// Removes `id` from the backend, then from the local lists.
    ///
    /// Unlike [`toggle_favorite`](Self::toggle_favorite) nothing changes
    /// locally until the backend confirms.
    pub async fn remove_favorite(&self, id: &str) -> FavoritesResult<()> {
        let session = self.sessions.require().await?;

        let lock = self.id_lock(id);
        let result = {
            let _guard = lock.lock().await;
            self.gateway.remove(&session.email, id).await
        };
        self.release_id_lock(id, lock);
        result?;

        let mut state = self.state();
        state.ids.retain(|existing| existing != id);
        state.entries.retain(|e| e.id != id);
        info!("Removed favorite {}", id);
        Ok(())
    }

    /// Forgets the session and drops the cached lists.
    pub async fn sign_out(&self) -> FavoritesResult<()> {
        self.sessions.logout().await?;
        self.clear();
        Ok(())
    }

    pub fn clear(&self) {
        self.state().clear();
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state().ids.iter().any(|existing| existing == id)
    }

    pub fn favorite_ids(&self) -> Vec<String> {
        self.state().ids.clone()
    }

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.state().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.state().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().ids.is_empty()
    }

    pub fn load_state(&self) -> LoadState {
        if self.state().loads_in_flight > 0 {
            LoadState::Loading
        } else {
            LoadState::Idle
        }
    }
}
