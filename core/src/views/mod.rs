//! View state machines.
//!
//! Each view owns its state and talks to the service only through
//! `MovieApi`. Nothing is shared between views; the server is the source of
//! truth. Every view has a convenience method that performs the call inline
//! and a `begin_*`/`finish_*` pair for drivers that run the request
//! elsewhere. Results finished with a ticket from before `unmount()` are
//! dropped.

pub mod detail;
pub mod form;
pub mod list;
pub mod status;

pub use detail::{DetailState, MovieDetailView};
pub use form::{Dialog, FormError, FormMode, MovieDraft, MovieForm, PendingSubmit, SubmitRequest};
pub use list::{MovieCard, MovieListView};
pub use status::{FormStatus, StatusFlag, Ticket, Tone};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::types::{Movie, MovieId};

    pub(crate) fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            movie_id: id,
            title: title.to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            cover_image_url: None,
            image_urls: Vec::new(),
            trailer_url: None,
        }
    }
}
