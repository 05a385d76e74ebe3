use crate::emitter::{JsonEmitter, ResponseEmitter};
use crate::exception::{ArgumentsHost, ExceptionFilter, HttpException};
use crate::responder::ErrorResponder;
use axum::response::Response;

/// The default exception filter
///
/// Builds the envelope through [`ErrorResponder`] and hands it, together with
/// the exception's own status code, to the configured [`ResponseEmitter`].
#[derive(Debug, Clone, Default)]
pub struct HttpExceptionFilter<E = JsonEmitter> {
    responder: ErrorResponder,
    emitter: E,
}

impl HttpExceptionFilter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: ResponseEmitter> HttpExceptionFilter<E> {
    pub fn with_emitter(emitter: E) -> Self {
        Self {
            responder: ErrorResponder::new(),
            emitter,
        }
    }
}

impl<E: ResponseEmitter> ExceptionFilter for HttpExceptionFilter<E> {
    fn catch(&self, exception: &HttpException, host: &ArgumentsHost) -> Response {
        let envelope = self.responder.respond_to(exception, host.request_url());
        self.emitter.reply(envelope, exception.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ErrorCategory;
    use crate::envelope::ErrorEnvelope;
    use axum::http::{HeaderValue, Method, StatusCode};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingEmitter {
        seen: Arc<Mutex<Vec<(ErrorEnvelope, StatusCode)>>>,
    }

    impl ResponseEmitter for RecordingEmitter {
        fn reply(&self, envelope: ErrorEnvelope, status: StatusCode) -> Response {
            self.seen.lock().unwrap().push((envelope, status));
            let mut response = Response::new(axum::body::Body::empty());
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert("x-recorded", HeaderValue::from_static("1"));
            response
        }
    }

    #[test]
    fn test_catch_hands_envelope_to_emitter() {
        let emitter = RecordingEmitter::default();
        let filter = HttpExceptionFilter::with_emitter(emitter.clone());
        let host = ArgumentsHost::new(Method::DELETE, "/users/42?force=true");

        let response = filter.catch(&HttpException::not_found("user 42 not found"), &host);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-recorded"], "1");

        let seen = emitter.seen.lock().unwrap();
        let (envelope, status) = &seen[0];
        assert_eq!(*status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.status_code, 404);
        assert_eq!(envelope.message, ErrorCategory::NotFound.message());
        assert_eq!(envelope.error, "user 42 not found");
        assert_eq!(envelope.path, "/users/42?force=true");
    }

    #[test]
    fn test_custom_status_reaches_emitter_unchanged() {
        let emitter = RecordingEmitter::default();
        let filter = HttpExceptionFilter::with_emitter(emitter.clone());
        let exception = HttpException::with_status(
            ErrorCategory::RequestTimeout,
            StatusCode::GATEWAY_TIMEOUT,
            "upstream slow",
        );

        let response = filter.catch(&exception, &ArgumentsHost::default());
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(emitter.seen.lock().unwrap()[0].0.status_code, 504);
    }
}
