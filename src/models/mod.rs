use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// `null` or a value of the wrong shape becomes the default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps the string items of a list, drops everything else.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Ratings arrive as numbers or numeric strings.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Listing status tag as sent by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Rent,
    Sale,
    Both,
    Sold,
    #[serde(other)]
    Unknown,
}

/// Identifier that the backend sends either as a string or as a number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(Number),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Text(value.to_string())
    }
}

/// Price field, string or number depending on which screen created the listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Amount {
    Text(String),
    Number(Number),
}

impl Amount {
    /// Empty strings and zero count as "no price", same as the mobile client.
    pub fn is_present(&self) -> bool {
        match self {
            Amount::Text(s) => !s.is_empty(),
            Amount::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Text(s) => f.write_str(s),
            // 15000.0 shows as 15000
            Amount::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{:.0}", v)
                }
                _ => write!(f, "{}", n),
            },
        }
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::Number(value.into())
    }
}

/// Every encoding the `photo` field shows up in.
///
/// Strings cover data URIs, `/uploads/` paths and absolute URLs; objects are
/// bundled asset references (or already resolved `{ uri }` sources). Any other
/// JSON value lands in `Other` and resolves to the placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Photo {
    Text(String),
    Object(Map<String, Value>),
    Other(Value),
}

/// Resolved image for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageSource {
    Uri(String),
    Bundled(Map<String, Value>),
    Placeholder,
}

impl From<ImageSource> for Photo {
    fn from(source: ImageSource) -> Self {
        match source {
            ImageSource::Uri(uri) => Photo::Text(uri),
            ImageSource::Bundled(asset) => Photo::Object(asset),
            ImageSource::Placeholder => Photo::Other(Value::Null),
        }
    }
}

/// Property record as owned by the backend. Read-only on the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub id: Option<RawId>,
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub mongo_id: Option<RawId>,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub rent_price: Option<Amount>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Amount>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
    #[serde(default, deserialize_with = "lenient_rating", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "or_default")]
    pub country: String,
    #[serde(default, deserialize_with = "or_default")]
    pub location: String,
    #[serde(default, deserialize_with = "or_default")]
    pub address: String,
    #[serde(default, deserialize_with = "string_list")]
    pub facilities: Vec<String>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<RawId>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

/// Display-ready favorite, derived 1:1 from a [`Property`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: String,
    pub price: String,
    pub price_unit: String,
    pub image: ImageSource,
    pub rating: f64,
    pub location: String,
    pub status: Option<Status>,
    pub facilities: Vec<String>,
}

/// Identity persisted on the device under the `"user"` key.
///
/// The email doubles as the favorites owner key on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSession {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawId>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<RawId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl UserSession {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            id: None,
            mongo_id: None,
            logged_in_at: Some(Utc::now()),
        }
    }

    /// `id`, falling back to `_id`
    pub fn user_id(&self) -> Option<&RawId> {
        self.id.as_ref().or(self.mongo_id.as_ref())
    }
}
