use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub cover_image_url: String,
    pub image_urls: Vec<String>,
    pub trailer_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    #[serde(default)]
    pub movie_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_date: String,
    #[serde(default)]
    pub cover_image_url: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub trailer_url: String,
}

impl MovieInput {
    fn into_movie(self, movie_id: i64) -> Movie {
        Movie {
            movie_id,
            title: self.title,
            description: self.description,
            release_date: as_datetime(&self.release_date),
            cover_image_url: self.cover_image_url,
            image_urls: self.image_urls,
            trailer_url: self.trailer_url,
        }
    }
}

/// Stored the way the catalog service returns dates: midnight datetimes.
fn as_datetime(date: &str) -> String {
    if date.len() == 10 {
        format!("{date}T00:00:00")
    } else {
        date.to_string()
    }
}

#[derive(Serialize, Deserialize)]
pub struct Uploaded {
    pub url: String,
}

struct StoredFile {
    content_type: String,
    bytes: Vec<u8>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    movies: BTreeMap<i64, Movie>,
    uploads: HashMap<String, StoredFile>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/movies", get(list_movies).post(create_movie))
        .route("/api/movies/", get(list_movies).post(create_movie))
        .route("/api/movies/upload", post(upload_file))
        .route(
            "/api/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/uploads/{name}", get(serve_upload))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_movies(State(db): State<Db>) -> Json<Vec<Movie>> {
    let store = db.read().await;
    Json(store.movies.values().cloned().collect())
}

async fn create_movie(
    State(db): State<Db>,
    Json(input): Json<MovieInput>,
) -> (StatusCode, Json<Movie>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let movie = input.into_movie(store.next_id);
    store.movies.insert(movie.movie_id, movie.clone());
    tracing::info!(movie_id = movie.movie_id, "created movie");
    (StatusCode::CREATED, Json(movie))
}

async fn get_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Movie>, StatusCode> {
    let store = db.read().await;
    store.movies.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MovieInput>,
) -> Result<Json<Movie>, StatusCode> {
    if input.movie_id.is_some_and(|body_id| body_id != id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let slot = store.movies.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_movie(id);
    tracing::info!(movie_id = id, "updated movie");
    Ok(Json(slot.clone()))
}

async fn delete_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .movies
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn upload_file(
    State(db): State<Db>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Uploaded>, StatusCode> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = sanitize(field.file_name().unwrap_or("upload"));
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;

        let name = format!("{}-{file_name}", Uuid::new_v4().simple());
        db.write().await.uploads.insert(
            name.clone(),
            StoredFile {
                content_type,
                bytes: bytes.to_vec(),
            },
        );
        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("localhost");
        tracing::info!(%name, "stored upload");
        return Ok(Json(Uploaded {
            url: format!("http://{host}/uploads/{name}"),
        }));
    }
    Err(StatusCode::BAD_REQUEST)
}

async fn serve_upload(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let store = db.read().await;
    let file = store.uploads.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    Ok((
        [(header::CONTENT_TYPE, file.content_type.clone())],
        file.bytes.clone(),
    ))
}

fn sanitize(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
