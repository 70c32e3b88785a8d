//! Stateless HTTP request builder and response parser for the movie API.
//!
//! # Design
//! `MovieClient` holds only the API root (`<base>/api/movies`) and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Any 2xx counts as success: the service answers create with 201 or 200 and
//! update/delete with 204 or 200 depending on version.

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Movie, MovieId, MoviePayload, UploadFile, UploadedFile};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the movie API.
#[derive(Debug, Clone)]
pub struct MovieClient {
    api_root: String,
}

impl MovieClient {
    /// `api_root` is the collection URL, e.g. `http://host/api/movies`.
    pub fn new(api_root: &str) -> Self {
        Self {
            api_root: api_root.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn build_fetch_movies(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/", self.api_root))
    }

    pub fn build_fetch_movie(&self, id: MovieId) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("{}/{id}", self.api_root))
    }

    pub fn build_add_movie(&self, movie: &MoviePayload) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, format!("{}/", self.api_root), movie)
    }

    pub fn build_update_movie(
        &self,
        id: MovieId,
        movie: &MoviePayload,
    ) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Put, format!("{}/{id}", self.api_root), movie)
    }

    pub fn build_delete_movie(&self, id: MovieId) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("{}/{id}", self.api_root))
    }

    pub fn build_upload_file(&self, file: &UploadFile) -> HttpRequest {
        let boundary = format!("smdb-{}", Uuid::new_v4().simple());
        self.build_upload_file_with_boundary(file, &boundary)
    }

    /// Same as `build_upload_file` with a caller-chosen multipart boundary.
    pub fn build_upload_file_with_boundary(
        &self,
        file: &UploadFile,
        boundary: &str,
    ) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/upload", self.api_root),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
            body: Some(HttpBody::Multipart(encode_multipart(file, boundary))),
        }
    }

    pub fn parse_fetch_movies(&self, response: HttpResponse) -> Result<Vec<Movie>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// A success status with an empty or `null` body means the movie is gone.
    pub fn parse_fetch_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response)?;
        if is_blank(&response.body) {
            return Err(ApiError::NotFound);
        }
        decode(&response.body)
    }

    pub fn parse_add_movie(&self, response: HttpResponse) -> Result<Movie, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// `None` when the server acknowledges the update without a body.
    pub fn parse_update_movie(&self, response: HttpResponse) -> Result<Option<Movie>, ApiError> {
        check_status(&response)?;
        if is_blank(&response.body) {
            return Ok(None);
        }
        decode(&response.body).map(Some)
    }

    pub fn parse_delete_movie(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    pub fn parse_upload_file(&self, response: HttpResponse) -> Result<UploadedFile, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    fn bare(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json(
        &self,
        method: HttpMethod,
        url: String,
        movie: &MoviePayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(movie)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![("content-type".to_string(), JSON.to_string())],
            body: Some(HttpBody::Json(body)),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn is_blank(body: &str) -> bool {
    let body = body.trim();
    body.is_empty() || body == "null"
}

/// Single-part `multipart/form-data` body with the binary under `file`.
fn encode_multipart(file: &UploadFile, boundary: &str) -> Vec<u8> {
    let file_name: String = file
        .file_name
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    let disposition =
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n");
    body.extend_from_slice(disposition.as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
