use crate::models::{Property, RawId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// One row of `GET /favorites/{email}`
///
/// `property` is `None` when the listing behind the favorite was deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFavorite {
    pub property_id: RawId,
    #[serde(default)]
    pub property: Option<Property>,
}

/// Rows stay raw so one bad row can be dropped on its own.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub success: Option<bool>,
    pub favorites: Option<Vec<Value>>,
    pub message: Option<String>,
}

/// Decodes each row separately, skipping the ones that don't fit.
pub fn decode_rows(rows: Vec<Value>) -> Vec<RemoteFavorite> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(favorite) => Some(favorite),
            Err(e) => {
                warn!("Skipping favorite row {}: {}", index, e);
                None
            }
        })
        .collect()
}

/// Body of `POST /favorites`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest<'a> {
    /// The backend keys favorites by email, not by user id
    pub user_id: &'a str,
    pub property_id: &'a str,
    pub property: &'a Property,
}

/// Reply of POST and DELETE, and the error body of any failed call
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
}
