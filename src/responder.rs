use crate::category::ErrorCategory;
use crate::envelope::ErrorEnvelope;
use crate::exception::HttpException;
use chrono::{SecondsFormat, Utc};

/// Builds error envelopes
///
/// Stateless: the only input besides the arguments is the wall clock, so a
/// single instance can be shared across any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorResponder;

impl ErrorResponder {
    pub fn new() -> Self {
        Self
    }

    /// Build the envelope for one failed request
    ///
    /// `status_code` is passed through untouched, `original_message` and
    /// `request_path` are copied verbatim.
    ///
    /// # Example
    /// ```
    /// use http_exception_filters::{ErrorCategory, ErrorResponder};
    ///
    /// let envelope = ErrorResponder::new().respond(
    ///     ErrorCategory::NotFound,
    ///     404,
    ///     "user 42 not found",
    ///     "/users/42",
    /// );
    /// assert_eq!(envelope.status_code, 404);
    /// assert_eq!(envelope.path, "/users/42");
    /// ```
    pub fn respond(
        &self,
        category: ErrorCategory,
        status_code: u16,
        original_message: impl Into<String>,
        request_path: impl Into<String>,
    ) -> ErrorEnvelope {
        ErrorEnvelope {
            status_code,
            message: category.message().to_string(),
            error: original_message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            path: request_path.into(),
        }
    }

    /// Build the envelope for a raised [`HttpException`]
    pub fn respond_to(
        &self,
        exception: &HttpException,
        request_path: impl Into<String>,
    ) -> ErrorEnvelope {
        self.respond(
            exception.category(),
            exception.status().as_u16(),
            exception.message(),
            request_path,
        )
    }
}
