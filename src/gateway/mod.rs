pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use http::HttpFavoritesGateway;
pub use traits::FavoritesGateway;
pub use types::RemoteFavorite;

/// Backend message that turns a failed DELETE into a no-op.
pub const FAVORITE_NOT_FOUND: &str = "Favorite not found";
pub const GENERIC_SERVER_ERROR: &str = "Server error";
