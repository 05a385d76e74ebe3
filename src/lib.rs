//! # http-exception-filters
//!
//! Uniform JSON error envelopes for typed HTTP exceptions in axum applications.
//!
//! Handlers raise an [`HttpException`] in one of thirteen [`ErrorCategory`]
//! kinds. The [`ExceptionFilterLayer`] catches it on the way out and answers
//! with an [`ErrorEnvelope`]:
//!
//! ```json
//! {
//!   "statusCode": 404,
//!   "message": "The requested resource could not be found but may be available in the future.",
//!   "error": "user 42 not found",
//!   "timestamp": "2026-10-19T08:30:00.123Z",
//!   "path": "/users/42"
//! }
//! ```
//!
//! ## Features
//!
//! - **Closed category set**: every category has exactly one message, checked at compile time
//! - **Pass-through status**: the envelope reports the exception's own status code
//! - **Framework rejections**: router 404/405 and extractor rejections get the same envelope
//! - **Pluggable emission**: swap the [`ResponseEmitter`] or the whole [`ExceptionFilter`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, extract::Path, routing::get};
//! use http_exception_filters::{ExceptionFilterLayer, FilterConfig, HttpException};
//!
//! async fn get_user(Path(id): Path<u64>) -> Result<String, HttpException> {
//!     Err(HttpException::not_found(format!("user {id} not found")))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = FilterConfig::from_env().unwrap_or_default();
//!
//!     let app: Router = Router::new()
//!         .route("/users/{id}", get(get_user))
//!         .layer(ExceptionFilterLayer::new().config(config));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod category;
pub mod config;
pub mod emitter;
pub mod envelope;
pub mod error;
pub mod exception;
pub mod responder;

// Re-export core types
pub use category::ErrorCategory;
pub use config::{ConfigService, FilterConfig};
pub use emitter::{JsonEmitter, ResponseEmitter};
pub use envelope::ErrorEnvelope;
pub use error::{FilterError, Result};
pub use exception::http::HttpExceptionFilter;
pub use exception::layer::{ExceptionFilterLayer, ExceptionFilterMiddleware};
pub use exception::{ArgumentsHost, ExceptionFilter, HttpException};
pub use responder::ErrorResponder;

/// Prelude module for convenient imports
///
/// ```
/// use http_exception_filters::prelude::*;
/// ```
pub mod prelude {
    pub use crate::category::ErrorCategory;
    pub use crate::config::FilterConfig;
    pub use crate::emitter::{JsonEmitter, ResponseEmitter};
    pub use crate::envelope::ErrorEnvelope;
    pub use crate::exception::http::HttpExceptionFilter;
    pub use crate::exception::layer::ExceptionFilterLayer;
    pub use crate::exception::{ArgumentsHost, ExceptionFilter, HttpException};
    pub use crate::responder::ErrorResponder;
}
