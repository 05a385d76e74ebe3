use crate::category::ErrorCategory;
use crate::config::FilterConfig;
use crate::exception::http::HttpExceptionFilter;
use crate::exception::{ArgumentsHost, ExceptionFilter, HttpException};
use axum::{
    body::Body,
    extract::OriginalUri,
    http::{HeaderMap, HeaderName, Request, header},
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer that routes exceptions through an [`ExceptionFilter`]
///
/// # Example
/// ```
/// use axum::{Router, routing::get};
/// use http_exception_filters::{ExceptionFilterLayer, HttpException};
///
/// async fn find_user() -> Result<String, HttpException> {
///     Err(HttpException::not_found("user 42 not found"))
/// }
///
/// let app: Router = Router::new()
///     .route("/users/42", get(find_user))
///     .layer(ExceptionFilterLayer::new());
/// ```
#[derive(Clone)]
pub struct ExceptionFilterLayer {
    filter: Arc<dyn ExceptionFilter>,
    config: Arc<FilterConfig>,
}

impl ExceptionFilterLayer {
    /// Layer using [`HttpExceptionFilter`] and the default config
    pub fn new() -> Self {
        Self::with_filter(HttpExceptionFilter::new())
    }

    pub fn with_filter(filter: impl ExceptionFilter) -> Self {
        Self {
            filter: Arc::new(filter),
            config: Arc::new(FilterConfig::default()),
        }
    }

    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = Arc::new(config);
        self
    }
}

impl Default for ExceptionFilterLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ExceptionFilterLayer {
    type Service = ExceptionFilterMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionFilterMiddleware {
            inner,
            filter: self.filter.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ExceptionFilterMiddleware<S> {
    inner: S,
    filter: Arc<dyn ExceptionFilter>,
    config: Arc<FilterConfig>,
}

impl<S> Service<Request<Body>> for ExceptionFilterMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let host = ArgumentsHost::new(
            request.method().clone(),
            request_url(&request, self.config.include_query),
        );
        let filter = self.filter.clone();
        let config = self.config.clone();

        // The clone may not be ready; keep the one poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(request).await?;
            Ok(filter_response(response, &host, filter.as_ref(), &config).await)
        })
    }
}

/// URL reported in the envelope, preferring the pre-nesting URI
fn request_url(request: &Request<Body>, include_query: bool) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());

    if include_query {
        uri.path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path())
            .to_string()
    } else {
        uri.path().to_string()
    }
}

async fn filter_response(
    response: Response,
    host: &ArgumentsHost,
    filter: &dyn ExceptionFilter,
    config: &FilterConfig,
) -> Response {
    let (mut parts, body) = response.into_parts();

    let exception = match parts.extensions.remove::<HttpException>() {
        Some(exception) => exception,
        None => {
            let category = match ErrorCategory::try_from(parts.status) {
                Ok(category) if config.convert_rejections && !is_json(&parts.headers) => {
                    category
                }
                _ => return Response::from_parts(parts, body),
            };
            // An encoded body is not readable text
            let message = if parts.headers.contains_key(header::CONTENT_ENCODING) {
                None
            } else {
                read_message(body, config.rejection_body_limit).await
            }
            .unwrap_or_else(|| category.reason().to_string());

            tracing::debug!(
                method = %host.method(),
                url = host.request_url(),
                status = parts.status.as_u16(),
                "converting framework rejection"
            );
            HttpException::with_status(category, parts.status, message)
        }
    };

    tracing::debug!(
        method = %host.method(),
        url = host.request_url(),
        status = exception.status().as_u16(),
        category = %exception.category(),
        "exception caught"
    );

    let mut filtered = filter.catch(&exception, host);
    carry_headers(&parts.headers, &mut filtered);
    filtered
}

/// `application/json` or any `+json` media type, ignoring case and parameters
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some((_, subtype)) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

async fn read_message(body: Body, limit: usize) -> Option<String> {
    let bytes = axum::body::to_bytes(body, limit).await.ok()?;
    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Headers describing the replaced body, never carried onto the envelope
fn is_entity_header(name: &HeaderName) -> bool {
    name.as_str().starts_with("content-")
        || *name == header::TRANSFER_ENCODING
        || *name == header::ETAG
        || *name == header::LAST_MODIFIED
        || *name == header::ACCEPT_RANGES
}

/// Keep headers such as `Allow` or `WWW-Authenticate` from the original response
fn carry_headers(original: &HeaderMap, filtered: &mut Response) {
    let headers = filtered.headers_mut();
    for name in original.keys() {
        if is_entity_header(name) || headers.contains_key(name) {
            continue;
        }
        for value in original.get_all(name) {
            headers.append(name.clone(), value.clone());
        }
    }
}
