//! Domain DTOs for the movie API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `Movie` is what the service returns and is decoded leniently: null text
//! becomes empty, empty URLs become `None`, and datetimes keep only their
//! date. `MoviePayload` is what the client sends and is always fully
//! populated, with absent URLs as `""`.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Server-assigned movie identifier.
pub type MovieId = i64;

/// A single movie returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    #[serde(default, alias = "imageUrl", deserialize_with = "blank_as_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub trailer_url: Option<String>,
}

impl Movie {
    /// Request payload that replaces this movie with its current fields.
    pub fn to_payload(&self) -> MoviePayload {
        MoviePayload {
            movie_id: Some(self.movie_id),
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: self.release_date,
            cover_image_url: self.cover_image_url.clone().unwrap_or_default(),
            image_urls: self.image_urls.clone(),
            trailer_url: self.trailer_url.clone().unwrap_or_default(),
        }
    }
}

/// Request body for create (no id) and update (id present).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<MovieId>,
    pub title: String,
    pub description: String,
    #[serde(with = "release_date")]
    pub release_date: NaiveDate,
    pub cover_image_url: String,
    pub image_urls: Vec<String>,
    pub trailer_url: String,
}

/// A local binary selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, inferring the content type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = content_type_for(path);
        Ok(Self::new(file_name, content_type, bytes))
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        _ => "application/octet-stream",
    }
}

/// Response of the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// `YYYY-MM-DD` on the wire; datetimes are accepted and truncated.
pub mod release_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        let date = raw.trim().split(['T', ' ']).next().unwrap_or_default();
        NaiveDate::parse_from_str(date, FORMAT)
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid releaseDate {raw:?}: {e}")))
    }
}
