use crate::error::{FilterError, Result};
use axum::http::StatusCode;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// The closed set of HTTP exception kinds the filters recognise.
///
/// Every variant has a fixed human-readable message and a conventional
/// status code. Both lookups are exhaustive matches, so adding a variant
/// without a message is a compile error rather than a runtime fallback.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum ErrorCategory {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    RequestTimeout,
    Conflict,
    Gone,
    PreconditionFailed,
    PayloadTooLarge,
    UnsupportedMediaType,
    UnprocessableEntity,
}

impl ErrorCategory {
    /// The fixed explanation placed in the envelope's `message` field
    pub fn message(self) -> &'static str {
        match self {
            Self::BadRequest => {
                "The server cannot or will not process the request due to an apparent client error."
            }
            Self::Unauthorized => "Authorization failed or was not provided.",
            Self::Forbidden => {
                "Server refusing action. Please check if you all the required permissions."
            }
            Self::NotFound => {
                "The requested resource could not be found but may be available in the future."
            }
            Self::MethodNotAllowed => {
                "A request method is not supported for the requested resource."
            }
            Self::NotAcceptable => {
                "The request is not acceptable as per the Accept Headers sent in the request."
            }
            Self::RequestTimeout => "The server timed out waiting for the request.",
            Self::Conflict => {
                "The request could not be processed because of conflict in the current state of the resource"
            }
            Self::Gone => {
                "The resource requested is no longer available and will not be available again."
            }
            Self::PreconditionFailed => {
                "The server does not meet one of the preconditions that the requester put on the request header fields."
            }
            Self::PayloadTooLarge => {
                "The request is larger than the server is willing or able to process."
            }
            Self::UnsupportedMediaType => {
                "The request entity has a media type which the server or resource does not support."
            }
            Self::UnprocessableEntity => {
                "The request was well-formed but was unable to be followed due to semantic errors."
            }
        }
    }

    /// The status code conventionally associated with this category
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Gone => StatusCode::GONE,
            Self::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Canonical reason phrase, used when an exception carries no message of its own
    pub fn reason(self) -> &'static str {
        self.status().canonical_reason().unwrap_or(self.into())
    }

    /// Parse a category from its variant name, e.g. `"NotFound"`
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| FilterError::UnknownCategory(name.to_string()))
    }
}

impl TryFrom<StatusCode> for ErrorCategory {
    type Error = FilterError;

    fn try_from(status: StatusCode) -> Result<Self> {
        let category = match status.as_u16() {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            406 => Self::NotAcceptable,
            408 => Self::RequestTimeout,
            409 => Self::Conflict,
            410 => Self::Gone,
            412 => Self::PreconditionFailed,
            413 => Self::PayloadTooLarge,
            415 => Self::UnsupportedMediaType,
            422 => Self::UnprocessableEntity,
            other => return Err(FilterError::UnmappedStatus(other)),
        };
        Ok(category)
    }
}
