//! Single movie view.

use tracing::{error, warn};

use crate::api::MovieApi;
use crate::error::ApiError;
use crate::route::{Navigation, Route};
use crate::types::{Movie, MovieId};
use crate::views::status::{Lifecycle, Ticket};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found.";
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Error,
    Loaded(Movie),
}

#[derive(Debug)]
pub struct MovieDetailView {
    id: MovieId,
    state: DetailState,
    life: Lifecycle,
}

impl MovieDetailView {
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            life: Lifecycle::mounted(),
        }
    }

    pub fn id(&self) -> MovieId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn movie(&self) -> Option<&Movie> {
        match &self.state {
            DetailState::Loaded(movie) => Some(movie),
            _ => None,
        }
    }

    pub fn load(&mut self, api: &impl MovieApi) {
        let ticket = self.begin_load();
        let result = api.fetch_movie_by_id(self.id);
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.state = DetailState::Loading;
        self.life.ticket()
    }

    /// Any failure, `NotFound` included, ends in `Error`.
    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Movie, ApiError>) {
        if !self.life.accepts(ticket) {
            warn!(movie_id = self.id, "dropping movie details that arrived after unmount");
            return;
        }
        self.state = match result {
            Ok(movie) => DetailState::Loaded(movie),
            Err(e) => {
                error!(movie_id = self.id, error = %e, "error fetching movie details");
                DetailState::Error
            }
        };
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
    }

    /// Status text for the non-loaded states.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            DetailState::Loading => Some(LOADING_MESSAGE),
            DetailState::Error => Some(NOT_FOUND_MESSAGE),
            DetailState::Loaded(_) => None,
        }
    }

    pub fn carousel(&self) -> Option<&[String]> {
        self.movie()
            .map(|m| m.image_urls.as_slice())
            .filter(|urls| !urls.is_empty())
    }

    /// Navigates to the edit form, carrying the fetched movie along.
    pub fn edit(&self) -> Option<Navigation> {
        self.movie()
            .map(|m| Navigation::with_state(Route::Edit(m.movie_id), m.clone()))
    }
}
