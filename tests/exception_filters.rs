use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Path},
    http::{Method, Request, StatusCode, header},
    routing::{get, post},
};
use chrono::DateTime;
use http_exception_filters::prelude::*;
use serde::Deserialize;
use strum::IntoEnumIterator;
use tower::{Layer, ServiceExt};

#[derive(Deserialize)]
#[allow(dead_code)]
struct CreateUser {
    name: String,
}

async fn raise(Path(name): Path<String>) -> Result<&'static str, HttpException> {
    let category = ErrorCategory::from_name(&name)
        .map_err(|e| HttpException::bad_request(e.to_string()))?;
    Err(HttpException::new(category, format!("raised {name}")))
}

fn router() -> Router {
    let api = Router::new()
        .route("/raise/{name}", get(raise))
        .route("/users", post(|Json(_): Json<CreateUser>| async { "created" }))
        .route("/upload", post(|body: String| async move { body }))
        .layer(DefaultBodyLimit::max(8));

    Router::new().nest("/api", api)
}

async fn call<S>(service: S, request: Request<Body>) -> (StatusCode, ErrorEnvelope)
where
    S: tower::Service<Request<Body>, Response = axum::response::Response>,
    S::Error: std::fmt::Debug,
{
    let response = service.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn every_category_round_trips_through_the_layer() {
    let app = router().layer(ExceptionFilterLayer::new());

    for category in ErrorCategory::iter() {
        let uri = format!("/api/raise/{category}");
        let (status, envelope) = call(app.clone(), get_request(&uri)).await;

        assert_eq!(status, category.status());
        assert_eq!(envelope.status_code, category.status().as_u16());
        assert_eq!(envelope.message, category.message());
        assert_eq!(envelope.error, format!("raised {category}"));
        assert_eq!(envelope.path, uri);
        assert!(DateTime::parse_from_rfc3339(&envelope.timestamp).is_ok());
    }
}

#[tokio::test]
async fn nested_routes_report_the_full_url() {
    let app = router().layer(ExceptionFilterLayer::new());
    let (_, envelope) = call(app, get_request("/api/raise/Gone?reason=old")).await;
    assert_eq!(envelope.path, "/api/raise/Gone?reason=old");
}

#[tokio::test]
async fn unknown_category_becomes_bad_request() {
    let app = router().layer(ExceptionFilterLayer::new());
    let (status, envelope) = call(app, get_request("/api/raise/Teapot")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.message, ErrorCategory::BadRequest.message());
    assert_eq!(envelope.error, "Unknown exception category: Teapot");
}

#[tokio::test]
async fn unmatched_route_is_not_found() {
    let app = ExceptionFilterLayer::new().layer(router());
    let (status, envelope) = call(app, get_request("/nowhere?x=1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope.status_code, 404);
    assert_eq!(envelope.message, ErrorCategory::NotFound.message());
    assert_eq!(envelope.error, "Not Found");
    assert_eq!(envelope.path, "/nowhere?x=1");
}

#[tokio::test]
async fn extractor_rejections_keep_their_text() {
    let app = ExceptionFilterLayer::new().layer(router());

    let missing_content_type = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .body(Body::from(r#"{"name":"a"}"#))
        .unwrap();
    let (status, envelope) = call(app.clone(), missing_content_type).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(envelope.message, ErrorCategory::UnsupportedMediaType.message());
    assert!(envelope.error.contains("Content-Type"));

    let wrong_shape = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"nom":"a"}"#))
        .unwrap();
    let (status, envelope) = call(app.clone(), wrong_shape).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(envelope.message, ErrorCategory::UnprocessableEntity.message());
    assert!(envelope.error.contains("name"));

    let too_large = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .body(Body::from("far more than eight bytes"))
        .unwrap();
    let (status, envelope) = call(app, too_large).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(envelope.message, ErrorCategory::PayloadTooLarge.message());
    assert_eq!(envelope.path, "/api/upload");
}

#[tokio::test]
async fn concurrent_requests_keep_their_own_envelopes() {
    let app = router().layer(ExceptionFilterLayer::new());
    let categories: Vec<_> = ErrorCategory::iter().collect();

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let app = app.clone();
            let category = categories[i % categories.len()];
            tokio::spawn(async move {
                let uri = format!("/api/raise/{category}?request={i}");
                let (_, envelope) = call(app, get_request(&uri)).await;
                (uri, category, envelope)
            })
        })
        .collect();

    for task in tasks {
        let (uri, category, envelope) = task.await.unwrap();
        assert_eq!(envelope.path, uri);
        assert_eq!(envelope.message, category.message());
        assert_eq!(envelope.error, format!("raised {category}"));
    }
}
