//! Favorites cache for the estate marketplace client.
//!
//! [`normalizer`] turns raw listings into display view-models, [`gateway`]
//! talks to the `/favorites` REST resource, and [`store::FavoritesStore`]
//! keeps the local cache in sync with optimistic toggles.

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod normalizer;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::{FavoritesError, FavoritesResult};
pub use gateway::{FavoritesGateway, HttpFavoritesGateway};
pub use models::{FavoriteEntry, ImageSource, Property, UserSession};
pub use session::{FileStorage, KeyValueStorage, MemoryStorage, SessionManager};
pub use store::{FavoritesStore, LoadState};
