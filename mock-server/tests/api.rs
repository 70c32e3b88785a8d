use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Movie, Uploaded};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn upload_request(part_name: &str, file_name: &str, content: &str) -> Request<String> {
    let body = format!(
        "--B\r\nContent-Disposition: form-data; name=\"{part_name}\"; filename=\"{file_name}\"\r\n\
         Content-Type: image/png\r\n\r\n{content}\r\n--B--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/movies/upload")
        .header(http::header::HOST, "media.test")
        .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=B")
        .body(body)
        .unwrap()
}

const ALIEN: &str = r#"{"title":"Alien","description":"In space","releaseDate":"1979-05-25"}"#;

// --- list ---

#[tokio::test]
async fn list_movies_empty() {
    for uri in ["/api/movies", "/api/movies/"] {
        let resp = app().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let movies: Vec<Movie> = body_json(resp).await;
        assert!(movies.is_empty());
    }
}

// --- create ---

#[tokio::test]
async fn create_movie_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/api/movies/", ALIEN))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let movie: Movie = body_json(resp).await;
    assert_eq!(movie.movie_id, 1);
    assert_eq!(movie.title, "Alien");
    assert_eq!(movie.release_date, "1979-05-25T00:00:00");
    assert!(movie.image_urls.is_empty());
}

#[tokio::test]
async fn create_movie_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/movies/", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_movie_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/movies/99"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_movie_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/movies/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_movie_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/movies/99", ALIEN))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_movie_with_mismatched_id_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/movies/1",
            r#"{"movieId":2,"title":"X","releaseDate":"2024-01-01"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_movie_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/movies/99"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- upload ---

#[tokio::test]
async fn upload_without_file_part_returns_400() {
    let resp = app()
        .oneshot(upload_request("poster", "a.png", "data"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn uploaded_file_is_served_back() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(upload_request("file", "my poster.png", "PNGDATA"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let uploaded: Uploaded = body_json(resp).await;
    assert!(uploaded.url.starts_with("http://media.test/uploads/"));
    assert!(uploaded.url.ends_with("-my_poster.png"));

    let path = uploaded.url.trim_start_matches("http://media.test");
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", path))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(body_bytes(resp).await.as_ref(), b"PNGDATA");
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/movies/", ALIEN))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Movie = body_json(resp).await;
    let id = created.movie_id;

    // list contains the one movie
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/movies/"))
        .await
        .unwrap();
    let movies: Vec<Movie> = body_json(resp).await;
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].movie_id, id);

    // update replaces every field
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/movies/{id}"),
            &format!(
                r#"{{"movieId":{id},"title":"Aliens","releaseDate":"1986-07-18",
                    "imageUrls":["u1"]}}"#
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Movie = body_json(resp).await;
    assert_eq!(updated.movie_id, id);
    assert_eq!(updated.title, "Aliens");
    assert_eq!(updated.description, "");
    assert_eq!(updated.image_urls, vec!["u1"]);

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/movies/{id}")))
        .await
        .unwrap();
    let fetched: Movie = body_json(resp).await;
    assert_eq!(fetched.title, "Aliens");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/movies/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/movies/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // ids are never reused
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/movies/", ALIEN))
        .await
        .unwrap();
    let second: Movie = body_json(resp).await;
    assert_eq!(second.movie_id, id + 1);
}
