//! The six logical operations the views depend on.
//!
//! `MovieApi` is the seam between the view state machines and the network.
//! `HttpMovieApi` is the real implementation: build with `MovieClient`,
//! execute with a `Transport`, parse with `MovieClient`. Every failure is
//! logged here once and then handed back to the caller unchanged.

use tracing::{error, info};

use crate::client::MovieClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Movie, MovieId, MoviePayload, UploadFile, UploadedFile};

#[cfg_attr(test, mockall::automock)]
pub trait MovieApi {
    fn fetch_movies(&self) -> Result<Vec<Movie>, ApiError>;

    fn fetch_movie_by_id(&self, id: MovieId) -> Result<Movie, ApiError>;

    /// Returns the created movie with its server-assigned id.
    fn add_movie(&self, movie: &MoviePayload) -> Result<Movie, ApiError>;

    /// Full replacement. `None` when the server answers without a body.
    fn update_movie(&self, id: MovieId, movie: &MoviePayload) -> Result<Option<Movie>, ApiError>;

    fn delete_movie(&self, id: MovieId) -> Result<(), ApiError>;

    fn upload_file(&self, file: &UploadFile) -> Result<UploadedFile, ApiError>;
}

/// `MovieApi` over real HTTP.
#[derive(Debug, Clone)]
pub struct HttpMovieApi<T> {
    client: MovieClient,
    transport: T,
}

impl HttpMovieApi<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(MovieClient::new(&config.api_root()), UreqTransport::new(config))
    }
}

impl<T: Transport> HttpMovieApi<T> {
    pub fn new(client: MovieClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &MovieClient {
        &self.client
    }
}

impl<T: Transport> MovieApi for HttpMovieApi<T> {
    fn fetch_movies(&self) -> Result<Vec<Movie>, ApiError> {
        let req = self.client.build_fetch_movies();
        self.transport
            .execute(req)
            .and_then(|resp| self.client.parse_fetch_movies(resp))
            .inspect_err(|e| error!(error = %e, "error fetching movies from backend"))
    }

    fn fetch_movie_by_id(&self, id: MovieId) -> Result<Movie, ApiError> {
        let req = self.client.build_fetch_movie(id);
        self.transport
            .execute(req)
            .and_then(|resp| self.client.parse_fetch_movie(resp))
            .inspect_err(|e| error!(movie_id = id, error = %e, "error fetching movie by id"))
    }

    fn add_movie(&self, movie: &MoviePayload) -> Result<Movie, ApiError> {
        let created = self
            .client
            .build_add_movie(movie)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.client.parse_add_movie(resp))
            .inspect_err(|e| error!(title = %movie.title, error = %e, "error adding movie"))?;
        info!(movie_id = created.movie_id, "movie added");
        Ok(created)
    }

    fn update_movie(&self, id: MovieId, movie: &MoviePayload) -> Result<Option<Movie>, ApiError> {
        let updated = self
            .client
            .build_update_movie(id, movie)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.client.parse_update_movie(resp))
            .inspect_err(|e| error!(movie_id = id, error = %e, "error updating movie"))?;
        info!(movie_id = id, "movie updated");
        Ok(updated)
    }

    fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        let req = self.client.build_delete_movie(id);
        self.transport
            .execute(req)
            .and_then(|resp| self.client.parse_delete_movie(resp))
            .inspect_err(|e| error!(movie_id = id, error = %e, "error deleting movie"))?;
        info!(movie_id = id, "movie deleted");
        Ok(())
    }

    fn upload_file(&self, file: &UploadFile) -> Result<UploadedFile, ApiError> {
        let req = self.client.build_upload_file(file);
        self.transport
            .execute(req)
            .and_then(|resp| self.client.parse_upload_file(resp))
            .inspect_err(|e| error!(file = %file.file_name, error = %e, "error uploading file"))
    }
}
