//! Maps a route to its view, drives the view and follows the navigation it
//! produces.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use movie_core::views::{DetailState, FormStatus, MovieDetailView, MovieForm, MovieListView};
use movie_core::{MovieApi, MovieId, Navigation, Route, UploadFile, ViewConfig};
use tracing::debug;

use crate::args::{Command, Field};
use crate::render;

pub struct App<'a, A, W, R> {
    api: &'a A,
    config: &'a ViewConfig,
    out: W,
    input: R,
}

impl<'a, A: MovieApi, W: Write, R: BufRead> App<'a, A, W, R> {
    pub fn new(api: &'a A, config: &'a ViewConfig, out: W, input: R) -> Self {
        Self {
            api,
            config,
            out,
            input,
        }
    }

    pub fn run(&mut self, cmd: &Command) -> Result<()> {
        let mut next = Some(Navigation::to(cmd.route));
        while let Some(nav) = next.take() {
            debug!(route = %nav.route, "navigating");
            let route = nav.route;
            next = match route {
                Route::List => self.list(cmd)?,
                Route::Detail(id) => self.detail(id)?,
                Route::Edit(id) if nav.state.is_none() => Some(self.edit_navigation(id)?),
                Route::Add | Route::Edit(_) => self.form(nav, cmd)?,
            };
        }
        Ok(())
    }

    fn list(&mut self, cmd: &Command) -> Result<Option<Navigation>> {
        let mut view = MovieListView::new(self.config);
        view.mount(self.api);
        if !view.is_loaded() {
            bail!("could not load movies");
        }

        if let Some(id) = cmd.delete {
            let present = view.movies().iter().any(|m| m.movie_id == id);
            view.request_delete(id);
            if cmd.yes || self.confirm(&format!("Delete movie {id}? [y/N] "))? {
                view.confirm_delete(self.api);
                if present && view.movies().iter().any(|m| m.movie_id == id) {
                    bail!("could not delete movie {id}");
                }
            } else {
                view.cancel_delete();
            }
        }

        render::list(&view.cards(), &mut self.out)?;
        Ok(None)
    }

    fn detail(&mut self, id: MovieId) -> Result<Option<Navigation>> {
        let mut view = MovieDetailView::new(id);
        view.load(self.api);
        render::detail(&view, &mut self.out)?;
        if view.state() == &DetailState::Error {
            bail!("movie {id} not found");
        }
        Ok(None)
    }

    /// `/edit/{id}` opened directly: fetch the movie the way the detail page
    /// would, then continue with its edit navigation.
    fn edit_navigation(&mut self, id: MovieId) -> Result<Navigation> {
        let mut view = MovieDetailView::new(id);
        view.load(self.api);
        view.edit().with_context(|| format!("movie {id} not found"))
    }

    fn form(&mut self, nav: Navigation, cmd: &Command) -> Result<Option<Navigation>> {
        let mut form = MovieForm::from_navigation(nav, self.config);

        let draft = form.draft_mut();
        for (field, value) in &cmd.fields {
            let slot = match field {
                Field::Title => &mut draft.title,
                Field::Description => &mut draft.description,
                Field::ReleaseDate => &mut draft.release_date,
                Field::TrailerUrl => &mut draft.trailer_url,
            };
            *slot = value.clone();
        }

        if cmd.drop_cover {
            form.remove_cover();
        }
        // Highest index first so earlier removals do not shift later ones.
        let mut drops = cmd.drop_images.clone();
        drops.sort_unstable_by(|a, b| b.cmp(a));
        drops.dedup();
        for index in drops {
            form.remove_image(index);
        }

        if let Some(path) = &cmd.cover {
            let file = UploadFile::from_path(path)
                .with_context(|| format!("reading {}", path.display()))?;
            form.upload_cover(self.api, &file);
        }
        if !cmd.images.is_empty() {
            let files = cmd
                .images
                .iter()
                .map(|p| {
                    UploadFile::from_path(p).with_context(|| format!("reading {}", p.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            form.upload_images(self.api, &files, Instant::now());
        }

        form.submit(self.api, Instant::now())?;
        render::form_outcome(&form, &mut self.out)?;
        if form.status() == FormStatus::Error {
            bail!("could not save movie");
        }
        Ok(form.dismiss_dialog())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }
}
