//! Add/edit form.
//!
//! The form is in edit mode when navigation handed it a movie and in add mode
//! otherwise. Images are uploaded as soon as they are picked; the submit
//! only sends URLs.

use std::time::Instant;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::MovieApi;
use crate::config::ViewConfig;
use crate::error::ApiError;
use crate::route::{Navigation, Route};
use crate::types::{release_date, Movie, MovieId, MoviePayload, UploadFile};
use crate::views::status::{FormStatus, Lifecycle, StatusFlag, Ticket, Tone};

pub const ADDED_MESSAGE: &str = "Movie added successfully!";
pub const UPDATED_MESSAGE: &str = "Movie updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(MovieId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("release date {0:?} is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("a submission is already in progress")]
    Busy,
}

/// Field state as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, as a date input produces it.
    pub release_date: String,
    pub cover_image_url: String,
    pub image_urls: Vec<String>,
    pub trailer_url: String,
}

impl MovieDraft {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            release_date: movie.release_date.format(release_date::FORMAT).to_string(),
            cover_image_url: movie.cover_image_url.clone().unwrap_or_default(),
            image_urls: movie.image_urls.clone(),
            trailer_url: movie.trailer_url.clone().unwrap_or_default(),
        }
    }

    /// Required-field checks, then the request body for `mode`.
    pub fn to_payload(&self, mode: FormMode) -> Result<MoviePayload, FormError> {
        require(&self.title, "title")?;
        require(&self.description, "description")?;
        require(&self.release_date, "releaseDate")?;
        // Strict: decoding server datetimes is lenient, typed input is not.
        let date = NaiveDate::parse_from_str(self.release_date.trim(), release_date::FORMAT)
            .map_err(|_| FormError::InvalidDate(self.release_date.clone()))?;

        Ok(MoviePayload {
            movie_id: match mode {
                FormMode::Edit(id) => Some(id),
                FormMode::Add => None,
            },
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: date,
            cover_image_url: self.cover_image_url.clone(),
            image_urls: self.image_urls.clone(),
            trailer_url: self.trailer_url.clone(),
        })
    }
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(())
}

/// Confirmation shown after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(MoviePayload),
    Update(MovieId, MoviePayload),
}

/// A submit that has been validated and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub ticket: Ticket,
    pub request: SubmitRequest,
}

#[derive(Debug)]
pub struct MovieForm {
    mode: FormMode,
    draft: MovieDraft,
    status: StatusFlag,
    dialog: Option<Dialog>,
    life: Lifecycle,
}

impl MovieForm {
    pub fn from_navigation(nav: Navigation, config: &ViewConfig) -> Self {
        match nav.state {
            Some(movie) => Self::edit(&movie, config),
            None => Self::add(config),
        }
    }

    pub fn add(config: &ViewConfig) -> Self {
        Self::with_mode(FormMode::Add, MovieDraft::default(), config)
    }

    pub fn edit(movie: &Movie, config: &ViewConfig) -> Self {
        Self::with_mode(FormMode::Edit(movie.movie_id), MovieDraft::from_movie(movie), config)
    }

    fn with_mode(mode: FormMode, draft: MovieDraft, config: &ViewConfig) -> Self {
        Self {
            mode,
            draft,
            status: StatusFlag::new(config.status_reset),
            dialog: None,
            life: Lifecycle::mounted(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &MovieDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MovieDraft {
        &mut self.draft
    }

    pub fn status(&self) -> FormStatus {
        self.status.get()
    }

    pub fn tone(&self) -> Tone {
        self.status.tone()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn shows_spinner(&self) -> bool {
        self.status.get() == FormStatus::Loading
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.status.get(), self.mode) {
            (FormStatus::Loading, _) => "Saving...",
            (FormStatus::Success, _) => "Saved!",
            (FormStatus::Error, _) => "Failed - try again",
            (FormStatus::Idle, FormMode::Add) => "Add Movie",
            (FormStatus::Idle, FormMode::Edit(_)) => "Update Movie",
        }
    }

    /// Uploads the cover immediately and keeps the returned URL.
    pub fn upload_cover(&mut self, api: &impl MovieApi, file: &UploadFile) {
        match api.upload_file(file) {
            Ok(uploaded) => self.draft.cover_image_url = uploaded.url,
            Err(e) => error!(file = %file.file_name, error = %e, "error uploading cover image"),
        }
    }

    /// Uploads one file at a time and appends each URL in selection order.
    ///
    /// A failed file flips the status to `Error`; earlier URLs stay and the
    /// remaining files are still attempted. A submit in flight keeps its
    /// `Loading` status so it cannot be sent twice.
    pub fn upload_images(&mut self, api: &impl MovieApi, files: &[UploadFile], now: Instant) {
        for file in files {
            match api.upload_file(file) {
                Ok(uploaded) => self.draft.image_urls.push(uploaded.url),
                Err(e) => {
                    error!(file = %file.file_name, error = %e, "error uploading image");
                    if self.status.get() != FormStatus::Loading {
                        self.status.set(FormStatus::Error, now);
                    }
                }
            }
        }
    }

    pub fn remove_cover(&mut self) {
        self.draft.cover_image_url.clear();
    }

    pub fn remove_image(&mut self, index: usize) {
        if index < self.draft.image_urls.len() {
            self.draft.image_urls.remove(index);
        }
    }

    /// Validates, sends create or update exactly once, and records the outcome.
    ///
    /// Only validation problems come back as `Err`; API failures end up in
    /// the status flag.
    pub fn submit(&mut self, api: &impl MovieApi, now: Instant) -> Result<(), FormError> {
        let pending = self.begin_submit(now)?;
        let result = match &pending.request {
            SubmitRequest::Create(payload) => api.add_movie(payload).map(|_| ()),
            SubmitRequest::Update(id, payload) => api.update_movie(*id, payload).map(|_| ()),
        };
        self.finish_submit(pending.ticket, result, now);
        Ok(())
    }

    pub fn begin_submit(&mut self, now: Instant) -> Result<PendingSubmit, FormError> {
        if self.status.get() == FormStatus::Loading {
            return Err(FormError::Busy);
        }
        let payload = self.draft.to_payload(self.mode)?;
        self.status.set(FormStatus::Loading, now);
        let request = match self.mode {
            FormMode::Add => SubmitRequest::Create(payload),
            FormMode::Edit(id) => SubmitRequest::Update(id, payload),
        };
        Ok(PendingSubmit {
            ticket: self.life.ticket(),
            request,
        })
    }

    pub fn finish_submit(&mut self, ticket: Ticket, result: Result<(), ApiError>, now: Instant) {
        if !self.life.accepts(ticket) {
            warn!("dropping submit result that arrived after unmount");
            return;
        }
        match result {
            Ok(()) => {
                info!(mode = ?self.mode, "movie saved");
                self.status.set(FormStatus::Success, now);
                self.dialog = Some(Dialog {
                    message: match self.mode {
                        FormMode::Add => ADDED_MESSAGE,
                        FormMode::Edit(_) => UPDATED_MESSAGE,
                    },
                });
            }
            Err(e) => {
                error!(mode = ?self.mode, error = %e, "error saving movie");
                self.status.set(FormStatus::Error, now);
            }
        }
    }

    /// Drives the status reset. Returns true if the status went back to idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.status.tick(now)
    }

    /// Closes the success dialog. Edit mode moves on to the movie's detail
    /// page; add mode clears the form for the next entry.
    pub fn dismiss_dialog(&mut self) -> Option<Navigation> {
        self.dialog.take()?;
        match self.mode {
            FormMode::Edit(id) => Some(Navigation::to(Route::Detail(id))),
            FormMode::Add => {
                self.draft = MovieDraft::default();
                None
            }
        }
    }

    pub fn unmount(&mut self) {
        self.life.unmount();
    }
}
