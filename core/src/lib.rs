//! Client core for the SMDB movie catalog service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` executes the
//! round-trip; `HttpMovieApi` glues the two together behind the `MovieApi`
//! trait, which is all the view state machines depend on.
//!
//! # Design
//! - `MovieClient` is stateless: it holds only the API root.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Views (`views::*`) own per-view state only. There is no cross-view cache.
//! - Configuration is an explicit `AppConfig` value passed at start-up.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod route;
pub mod transport;
pub mod types;
pub mod views;

pub use api::{HttpMovieApi, MovieApi};
pub use client::MovieClient;
pub use config::{AppConfig, ClientConfig, ConfigError, ViewConfig};
pub use error::ApiError;
pub use http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use route::{Navigation, Route, RouteError};
pub use transport::{Transport, UreqTransport};
pub use types::{Movie, MovieId, MoviePayload, UploadFile, UploadedFile};
