use crate::envelope::ErrorEnvelope;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Writes an error envelope onto the transport
///
/// Implement this to change how envelopes are emitted (extra headers,
/// a different content type) without touching the filters themselves.
pub trait ResponseEmitter: Send + Sync + 'static {
    fn reply(&self, envelope: ErrorEnvelope, status: StatusCode) -> Response;
}

/// Emits the envelope as an `application/json` body
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl ResponseEmitter for JsonEmitter {
    fn reply(&self, envelope: ErrorEnvelope, status: StatusCode) -> Response {
        (status, Json(envelope)).into_response()
    }
}
