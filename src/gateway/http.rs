use crate::config::Config;
use crate::error::{FavoritesError, FavoritesResult};
use crate::gateway::traits::FavoritesGateway;
use crate::gateway::types::{decode_rows, AddRequest, ListResponse, RemoteFavorite, StatusResponse};
use crate::gateway::{FAVORITE_NOT_FOUND, GENERIC_SERVER_ERROR};
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// `FavoritesGateway` over the backend's `/favorites` REST resource
pub struct HttpFavoritesGateway {
    client: Client,
    base_url: Url,
}

impl HttpFavoritesGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot take path segments: {}", config.base_url);
        }

        Ok(Self { client, base_url })
    }

    /// `{base}/favorites/{segments...}` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("favorites");
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }
}

/// Maps error statuses to `Server` and decodes the body of a 2xx reply.
async fn read_body<T: DeserializeOwned>(response: Response) -> FavoritesResult<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| FavoritesError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<StatusResponse>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        warn!("Favorites request failed with {}: {}", status, message);
        return Err(FavoritesError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| FavoritesError::Malformed(e.to_string()))
}

/// Rejects a 2xx reply whose body lacks `success` or reports `success: false`.
fn check_success(status: u16, success: Option<bool>, message: Option<String>) -> FavoritesResult<()> {
    match success {
        Some(true) => Ok(()),
        Some(false) => Err(FavoritesError::Server {
            status,
            message: message.unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string()),
        }),
        None => Err(FavoritesError::Malformed(
            "response has no `success` field".to_string(),
        )),
    }
}

#[async_trait]
impl FavoritesGateway for HttpFavoritesGateway {
    async fn list(&self, email: &str) -> FavoritesResult<Vec<RemoteFavorite>> {
        let url = self.endpoint(&[email]);
        debug!("Fetching favorites: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body: ListResponse = read_body(response).await?;
        check_success(status, body.success, body.message)?;

        let rows = body.favorites.ok_or_else(|| {
            FavoritesError::Malformed("response has no `favorites` field".to_string())
        })?;
        let favorites = decode_rows(rows);

        info!("Fetched {} favorites for {}", favorites.len(), email);
        Ok(favorites)
    }

    async fn add(&self, email: &str, property_id: &str, property: &Property) -> FavoritesResult<()> {
        let url = self.endpoint(&[]);
        debug!("Adding favorite {} for {}", property_id, email);

        let request = AddRequest {
            user_id: email,
            property_id,
            property,
        };
        let response = self.client.post(url).json(&request).send().await?;
        let status = response.status().as_u16();
        let body: StatusResponse = read_body(response).await?;
        check_success(status, body.success, body.message)
    }

    async fn remove(&self, email: &str, property_id: &str) -> FavoritesResult<()> {
        let url = self.endpoint(&[email, property_id]);
        debug!("Removing favorite {} for {}", property_id, email);

        let response = self.client.delete(url).send().await?;
        let status = response.status().as_u16();
        let result = read_body::<StatusResponse>(response)
            .await
            .and_then(|body| check_success(status, body.success, body.message));

        match result {
            Err(FavoritesError::Server { message, .. }) if message == FAVORITE_NOT_FOUND => {
                debug!("Favorite {} was already gone", property_id);
                Ok(())
            }
            other => other,
        }
    }
}
