//! A small server that answers every failure with an error envelope.
//!
//! ```sh
//! cargo run --example error-server
//! curl -i localhost:3000/users/42
//! curl -i -X DELETE localhost:3000/users/1
//! curl -i localhost:3000/missing
//! ```

use axum::{Json, Router, ServiceExt, extract::Path, routing::get};
use http_exception_filters::prelude::*;
use serde::Serialize;
use tower::Layer;
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
struct User {
    id: u64,
    name: String,
}

async fn get_user(Path(id): Path<u64>) -> Result<Json<User>, HttpException> {
    match id {
        1 => Ok(Json(User {
            id,
            name: "Test User".to_string(),
        })),
        7 => Err(HttpException::gone("user 7 was deleted")),
        _ => Err(HttpException::not_found(format!("user {id} not found"))),
    }
}

async fn delete_user(Path(id): Path<u64>) -> Result<(), HttpException> {
    Err(HttpException::forbidden(format!("cannot delete user {id}")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = FilterConfig::from_env()?;
    tracing::info!(?config, "exception filter config loaded");

    let app = Router::new()
        .route("/users/{id}", get(get_user).delete(delete_user))
        .layer(TraceLayer::new_for_http());

    // Outermost so unmatched routes are caught as well
    let app = ExceptionFilterLayer::new().config(config).layer(app);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
