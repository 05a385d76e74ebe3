use crate::category::ErrorCategory;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub mod http;
pub mod layer;

/// Request context handed to an [`ExceptionFilter`]
#[derive(Debug, Clone, Default)]
pub struct ArgumentsHost {
    method: Method,
    url: String,
}

impl ArgumentsHost {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// URL of the inbound request, as reported in the envelope's `path`
    pub fn request_url(&self) -> &str {
        &self.url
    }
}

/// The ExceptionFilter trait
///
/// Filters turn an exception raised during request processing into the
/// response sent to the client. They must always return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, exception: &HttpException, host: &ArgumentsHost) -> Response;
}

/// A typed HTTP error carrying its category, status code and message
///
/// Return it from a handler (`Result<T, HttpException>`) and the
/// [`ExceptionFilterLayer`](layer::ExceptionFilterLayer) renders it as an
/// [`ErrorEnvelope`](crate::ErrorEnvelope).
///
/// Rendered without the layer, the envelope's `path` is an empty string,
/// since the request URL is only known to the layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpException {
    category: ErrorCategory,
    status: StatusCode,
    message: String,
}

macro_rules! category_constructors {
    ($($name:ident => $category:ident),* $(,)?) => {
        $(
            #[doc = concat!("A `", stringify!($category), "` exception with its conventional status")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCategory::$category, message)
            }
        )*
    };
}

impl HttpException {
    /// Exception with the category's conventional status code
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::with_status(category, category.status(), message)
    }

    /// Exception with a caller-chosen status code, reported as-is
    pub fn with_status(
        category: ErrorCategory,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            status,
            message: message.into(),
        }
    }

    /// Exception whose message is the status' reason phrase, e.g. `"Not Found"`
    pub fn from_category(category: ErrorCategory) -> Self {
        Self::new(category, category.reason())
    }

    category_constructors! {
        bad_request => BadRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        not_found => NotFound,
        method_not_allowed => MethodNotAllowed,
        not_acceptable => NotAcceptable,
        request_timeout => RequestTimeout,
        conflict => Conflict,
        gone => Gone,
        precondition_failed => PreconditionFailed,
        payload_too_large => PayloadTooLarge,
        unsupported_media_type => UnsupportedMediaType,
        unprocessable_entity => UnprocessableEntity,
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorCategory> for HttpException {
    fn from(category: ErrorCategory) -> Self {
        Self::from_category(category)
    }
}

impl IntoResponse for HttpException {
    fn into_response(self) -> Response {
        // Without a request in hand the path is left empty; the layer
        // re-renders from the extension once it knows the URL.
        let mut response =
            http::HttpExceptionFilter::new().catch(&self, &ArgumentsHost::default());
        response.extensions_mut().insert(self);
        response
    }
}
