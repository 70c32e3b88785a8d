//! Client-side routes and navigation state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{Movie, MovieId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/add`
    Add,
    /// `/movie/{id}`
    Detail(MovieId),
    /// `/edit/{id}`
    Edit(MovieId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0:?}")]
    Unknown(String),

    #[error("invalid movie id {0:?}")]
    InvalidId(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Ok(Route::List),
            ["add"] => Ok(Route::Add),
            ["movie", id] => parse_id(id).map(Route::Detail),
            ["edit", id] => parse_id(id).map(Route::Edit),
            _ => Err(RouteError::Unknown(trimmed.to_string())),
        }
    }
}

fn parse_id(raw: &str) -> Result<MovieId, RouteError> {
    raw.parse().map_err(|_| RouteError::InvalidId(raw.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Add => write!(f, "/add"),
            Route::Detail(id) => write!(f, "/movie/{id}"),
            Route::Edit(id) => write!(f, "/edit/{id}"),
        }
    }
}

/// A route plus the state handed to the next view.
///
/// The detail view passes the movie it already fetched to the edit form so
/// the form can start without a second request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<Movie>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn with_state(route: Route, movie: Movie) -> Self {
        Self {
            route,
            state: Some(movie),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        assert_eq!(Route::parse("/").unwrap(), Route::List);
        assert_eq!(Route::parse("").unwrap(), Route::List);
        assert_eq!(Route::parse("/add").unwrap(), Route::Add);
        assert_eq!(Route::parse("/movie/99").unwrap(), Route::Detail(99));
        assert_eq!(Route::parse("/edit/7/").unwrap(), Route::Edit(7));
    }

    #[test]
    fn display_and_parse_agree() {
        for route in [Route::List, Route::Add, Route::Detail(3), Route::Edit(12)] {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn rejects_unknown_paths_and_bad_ids() {
        assert_eq!(
            Route::parse("/movies").unwrap_err(),
            RouteError::Unknown("/movies".to_string())
        );
        assert_eq!(
            Route::parse("/movie/abc").unwrap_err(),
            RouteError::InvalidId("abc".to_string())
        );
        assert!(Route::parse("/edit").is_err());
    }
}
