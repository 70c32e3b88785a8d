//! Command-line parsing.
//!
//! `smdb [ROUTE] [--yes] [--delete ID] [--drop-cover] [key=value ...]`
//!
//! The first positional argument starting with `/` is the route. Everything
//! else is a flag or a `key=value` pair: movie fields (`title`,
//! `description`, `releaseDate`, `trailerUrl`), files to upload (`cover`,
//! `image`, repeatable), and `drop-image=INDEX` to remove an existing image.

use std::path::PathBuf;

use movie_core::{MovieId, Route, RouteError};
use thiserror::Error;

pub const USAGE: &str = "\
usage: smdb [ROUTE] [OPTIONS] [key=value ...]

routes:
  /              list movies (default)
  /movie/ID      show one movie
  /add           add a movie
  /edit/ID       edit a movie

options:
  --delete ID    delete a movie from the list (asks for confirmation)
  --yes          skip the delete confirmation
  --drop-cover   remove the cover image before saving
  -h, --help     show this message

fields:
  title=TEXT description=TEXT releaseDate=YYYY-MM-DD trailerUrl=URL
  cover=PATH image=PATH (repeatable) drop-image=INDEX (repeatable)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("unknown argument {0:?}")]
    Unknown(String),

    #[error("{0} needs a value")]
    MissingValue(&'static str),

    #[error("invalid {what} {value:?}")]
    Invalid { what: &'static str, value: String },
}

/// A movie field set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    ReleaseDate,
    TrailerUrl,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "title" => Some(Field::Title),
            "description" => Some(Field::Description),
            "releaseDate" => Some(Field::ReleaseDate),
            "trailerUrl" => Some(Field::TrailerUrl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub route: Route,
    pub help: bool,
    pub yes: bool,
    pub delete: Option<MovieId>,
    pub drop_cover: bool,
    pub drop_images: Vec<usize>,
    pub fields: Vec<(Field, String)>,
    pub cover: Option<PathBuf>,
    pub images: Vec<PathBuf>,
}

impl Default for Command {
    fn default() -> Self {
        Self {
            route: Route::List,
            help: false,
            yes: false,
            delete: None,
            drop_cover: false,
            drop_images: Vec::new(),
            fields: Vec::new(),
            cover: None,
            images: Vec::new(),
        }
    }
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Command::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => cmd.help = true,
                "--yes" | "-y" => cmd.yes = true,
                "--drop-cover" => cmd.drop_cover = true,
                "--delete" => {
                    let raw = args.next().ok_or(ArgsError::MissingValue("--delete"))?;
                    cmd.delete = Some(parse_number(&raw, "movie id")?);
                }
                path if path.starts_with('/') => cmd.route = Route::parse(path)?,
                pair => cmd.apply_pair(pair)?,
            }
        }
        Ok(cmd)
    }

    fn apply_pair(&mut self, pair: &str) -> Result<(), ArgsError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ArgsError::Unknown(pair.to_string()))?;
        match key {
            "cover" => self.cover = Some(PathBuf::from(value)),
            "image" => self.images.push(PathBuf::from(value)),
            "drop-image" => self.drop_images.push(parse_number(value, "image index")?),
            _ => {
                let field = Field::from_key(key)
                    .ok_or_else(|| ArgsError::Unknown(pair.to_string()))?;
                self.fields.push((field, value.to_string()));
            }
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, what: &'static str) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::Invalid {
        what,
        value: raw.to_string(),
    })
}
