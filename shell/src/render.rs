//! Plain-text rendering of the views.

use std::io::{self, Write};

use movie_core::views::{MovieCard, MovieDetailView, MovieForm};

pub fn list(cards: &[MovieCard], out: &mut impl Write) -> io::Result<()> {
    if cards.is_empty() {
        return writeln!(out, "No movies yet.");
    }
    for card in cards {
        writeln!(out, "#{:<5} {}", card.id, card.title)?;
        if !card.summary.is_empty() {
            writeln!(out, "       {}", card.summary)?;
        }
        writeln!(out, "       poster: {}", card.image_url)?;
    }
    Ok(())
}

pub fn detail(view: &MovieDetailView, out: &mut impl Write) -> io::Result<()> {
    let Some(movie) = view.movie() else {
        return writeln!(out, "{}", view.message().unwrap_or_default());
    };

    writeln!(out, "{}", movie.title)?;
    writeln!(out, "{}", "=".repeat(movie.title.chars().count()))?;
    if !movie.description.is_empty() {
        writeln!(out, "{}", movie.description)?;
    }
    writeln!(out, "Release Date: {}", movie.release_date.format("%Y-%m-%d"))?;
    if let Some(cover) = &movie.cover_image_url {
        writeln!(out, "Cover: {cover}")?;
    }
    if let Some(images) = view.carousel() {
        writeln!(out, "Images ({}):", images.len())?;
        for (i, url) in images.iter().enumerate() {
            writeln!(out, "  [{i}] {url}")?;
        }
    }
    if let Some(trailer) = &movie.trailer_url {
        writeln!(out, "Watch Trailer: {trailer}")?;
    }
    writeln!(out, "Edit: smdb /edit/{}", movie.movie_id)
}

pub fn form_outcome(form: &MovieForm, out: &mut impl Write) -> io::Result<()> {
    match form.dialog() {
        Some(dialog) => writeln!(out, "{}", dialog.message),
        None => writeln!(out, "[{}]", form.submit_label()),
    }
}

#[cfg(test)]
mod tests {
    use movie_core::views::{FormStatus, MovieListView};
    use movie_core::{ApiError, Movie, ViewConfig};

    use super::*;

    fn movie() -> Movie {
        serde_json::from_str(
            r#"{"movieId":3,"title":"Heat","description":"LA crime","releaseDate":"1995-12-15",
                "coverImageUrl":"http://img/c.jpg","imageUrls":["http://img/1.jpg"],
                "trailerUrl":"http://yt/h"}"#,
        )
        .unwrap()
    }

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_list_has_placeholder() {
        let view = MovieListView::new(&ViewConfig::default());
        assert_eq!(rendered(|out| list(&view.cards(), out)), "No movies yet.\n");
    }

    #[test]
    fn list_shows_id_title_and_poster() {
        let mut view = MovieListView::new(&ViewConfig::default());
        let ticket = view.begin_fetch().unwrap();
        view.finish_fetch(ticket, Ok(vec![movie()]));
        let text = rendered(|out| list(&view.cards(), out));
        assert!(text.starts_with("#3     Heat\n"));
        assert!(text.contains("LA crime"));
        assert!(text.contains("poster: http://img/c.jpg"));
    }

    #[test]
    fn detail_renders_every_field() {
        let mut view = MovieDetailView::new(3);
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(movie()));
        let text = rendered(|out| detail(&view, out));
        assert!(text.starts_with("Heat\n====\n"));
        assert!(text.contains("Release Date: 1995-12-15"));
        assert!(text.contains("Images (1):\n  [0] http://img/1.jpg"));
        assert!(text.contains("Watch Trailer: http://yt/h"));
        assert!(text.ends_with("Edit: smdb /edit/3\n"));
    }

    #[test]
    fn missing_detail_shows_not_found() {
        let mut view = MovieDetailView::new(99);
        let ticket = view.begin_load();
        view.finish_load(ticket, Err(ApiError::NotFound));
        assert_eq!(rendered(|out| detail(&view, out)), "Movie not found.\n");
    }

    #[test]
    fn failed_form_shows_button_label() {
        let mut form = MovieForm::add(&ViewConfig::default());
        let draft = form.draft_mut();
        draft.title = "X".to_string();
        draft.description = "Y".to_string();
        draft.release_date = "2024-01-01".to_string();
        let pending = form.begin_submit(std::time::Instant::now()).unwrap();
        form.finish_submit(pending.ticket, Err(ApiError::Timeout), std::time::Instant::now());
        assert_eq!(form.status(), FormStatus::Error);
        assert_eq!(rendered(|out| form_outcome(&form, out)), "[Failed - try again]\n");
    }
}
