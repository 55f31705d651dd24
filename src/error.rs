//! Error type shared by the gateway, the session storage and the store.

/// Everything a favorites operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// No session in local storage. Raised before any network call.
    #[error("Not signed in")]
    NotAuthenticated,

    /// No response came back (connect failure, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an error status or `success: false`.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The property carries neither `id` nor `_id`, so it can't be persisted.
    #[error("Property has no id")]
    MissingPropertyId,

    /// Device-local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FavoritesError {
    /// Text suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            FavoritesError::NotAuthenticated => "Please log in to manage favorites".to_string(),
            FavoritesError::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            FavoritesError::Server { message, .. } => message.clone(),
            FavoritesError::Malformed(_) => "Unexpected response from server".to_string(),
            FavoritesError::MissingPropertyId => "This property can't be saved".to_string(),
            FavoritesError::Storage(_) => "Could not read your session".to_string(),
        }
    }
}

impl From<reqwest::Error> for FavoritesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FavoritesError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            FavoritesError::Server {
                status: status.as_u16(),
                message: crate::gateway::GENERIC_SERVER_ERROR.to_string(),
            }
        } else {
            FavoritesError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for FavoritesError {
    fn from(err: std::io::Error) -> Self {
        FavoritesError::Storage(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FavoritesError>`.
pub type FavoritesResult<T> = Result<T, FavoritesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_server_text() {
        let err = FavoritesError::Server {
            status: 400,
            message: "Property already in favorites".to_string(),
        };
        assert_eq!(err.user_message(), "Property already in favorites");
        assert_eq!(err.to_string(), "Server error (400): Property already in favorites");
    }

    #[test]
    fn test_network_message_mentions_connection() {
        let err = FavoritesError::Network("timed out".to_string());
        assert!(err.user_message().contains("check your connection"));
    }
}
