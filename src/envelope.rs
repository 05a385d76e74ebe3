use serde::{Deserialize, Serialize};

/// The normalized JSON body returned for every caught exception.
///
/// Fields serialize in declaration order:
/// `statusCode`, `message`, `error`, `timestamp`, `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Status carried by the originating exception
    pub status_code: u16,

    /// Fixed explanation for the exception's category
    pub message: String,

    /// The exception's own message, verbatim
    pub error: String,

    /// ISO-8601 UTC instant with millisecond precision
    pub timestamp: String,

    /// URL of the inbound request, verbatim
    pub path: String,
}
