//! Movie list: fetch once on mount, render cards, delete with confirmation.

use std::collections::HashSet;

use tracing::{error, warn};

use crate::api::MovieApi;
use crate::config::ViewConfig;
use crate::error::ApiError;
use crate::route::{Navigation, Route};
use crate::types::{Movie, MovieId};
use crate::views::status::{Lifecycle, Ticket};

/// What a list entry shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    /// First line of the description.
    pub summary: String,
    /// Cover URL, or the fallback when absent or reported broken.
    pub image_url: String,
}

#[derive(Debug)]
pub struct MovieListView {
    movies: Vec<Movie>,
    fetch_issued: bool,
    loaded: bool,
    pending_delete: Option<MovieId>,
    broken_images: HashSet<MovieId>,
    fallback_image: String,
    life: Lifecycle,
}

impl MovieListView {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            movies: Vec::new(),
            fetch_issued: false,
            loaded: false,
            pending_delete: None,
            broken_images: HashSet::new(),
            fallback_image: config.fallback_image.clone(),
            life: Lifecycle::mounted(),
        }
    }

    /// Fetches the list. Only the first call per view issues a request.
    pub fn mount(&mut self, api: &impl MovieApi) {
        if let Some(ticket) = self.begin_fetch() {
            let result = api.fetch_movies();
            self.finish_fetch(ticket, result);
        }
    }

    /// `None` if the fetch was already issued or the view is gone.
    pub fn begin_fetch(&mut self) -> Option<Ticket> {
        if self.fetch_issued || !self.life.is_mounted() {
            return None;
        }
        self.fetch_issued = true;
        Some(self.life.ticket())
    }

    pub fn finish_fetch(&mut self, ticket: Ticket, result: Result<Vec<Movie>, ApiError>) {
        if !self.life.accepts(ticket) {
            warn!("dropping movie list that arrived after unmount");
            return;
        }
        match result {
            Ok(movies) => {
                self.movies = movies;
                self.loaded = true;
            }
            Err(e) => error!(error = %e, "error fetching movies"),
        }
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Opens the confirmation prompt for `id`.
    pub fn request_delete(&mut self, id: MovieId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<MovieId> {
        self.pending_delete
    }

    /// Deletes the movie awaiting confirmation, if any.
    pub fn confirm_delete(&mut self, api: &impl MovieApi) {
        if let Some((ticket, id)) = self.begin_delete() {
            let result = api.delete_movie(id);
            self.finish_delete(ticket, id, result);
        }
    }

    /// Closes the prompt and hands out the id to delete.
    pub fn begin_delete(&mut self) -> Option<(Ticket, MovieId)> {
        let id = self.pending_delete.take()?;
        Some((self.life.ticket(), id))
    }

    /// Removes `id` locally on success; the list is untouched on failure.
    pub fn finish_delete(&mut self, ticket: Ticket, id: MovieId, result: Result<(), ApiError>) {
        if !self.life.accepts(ticket) {
            warn!(movie_id = id, "dropping delete result that arrived after unmount");
            return;
        }
        match result {
            Ok(()) => {
                let before = self.movies.len();
                self.movies.retain(|m| m.movie_id != id);
                if self.movies.len() == before {
                    warn!(movie_id = id, "deleted movie was not in the list");
                }
                self.broken_images.remove(&id);
            }
            Err(e) => error!(movie_id = id, error = %e, "error deleting movie"),
        }
    }

    /// The cover for `id` failed to load; show the fallback from now on.
    pub fn image_failed(&mut self, id: MovieId) {
        self.broken_images.insert(id);
    }

    pub fn cards(&self) -> Vec<MovieCard> {
        self.movies
            .iter()
            .map(|m| MovieCard {
                id: m.movie_id,
                title: m.title.clone(),
                summary: m.description.lines().next().unwrap_or_default().to_string(),
                image_url: match &m.cover_image_url {
                    Some(url) if !self.broken_images.contains(&m.movie_id) => url.clone(),
                    _ => self.fallback_image.clone(),
                },
            })
            .collect()
    }

    pub fn open(&self, id: MovieId) -> Navigation {
        Navigation::to(Route::Detail(id))
    }
}
