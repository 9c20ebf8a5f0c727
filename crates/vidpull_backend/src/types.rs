use serde::Deserialize;
use thiserror::Error;

/// Status payload as returned by `GET /status/{id}`.
///
/// `progress` arrives as a JSON number and may be fractional; it is only
/// meaningful while `status` is `downloading`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusPayload {
    pub status: StatusKind,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Downloading,
    Completed,
    Error,
    NotFound,
}

/// One entry of the `GET /videos` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoEntry {
    pub filename: String,
    pub size: u64,
    pub size_mb: f64,
}

/// Successful response to `POST /download`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StartResponse {
    pub download_id: String,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed or the client not built.
    #[error("invalid backend address: {0}")]
    BadAddress(String),
    /// The backend answered with a non-success status and (maybe) a reason.
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    /// The request never completed: connect failure, timeout, broken stream.
    #[error("connection error: {0}")]
    Transport(String),
    /// The response arrived but its body did not parse.
    #[error("malformed backend payload: {0}")]
    Payload(String),
}
