use serde::Deserialize;
use thiserror::Error;

pub type JobId = String;

/// Validated body of a successful upload response. The job id is
/// guaranteed non-empty; a 2xx body without one fails as
/// [`ApiError::MissingJobId`] before a receipt is ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub job_id: JobId,
    pub filename: Option<String>,
    pub status: Option<String>,
}

/// Body of a status response. Every field is optional; absent fields mean
/// "no change" for the tracked job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Event emitted by the HTTP worker back to the controller loop.
#[derive(Debug, PartialEq, Eq)]
pub enum ClientEvent {
    UploadFinished {
        result: Result<UploadReceipt, ApiError>,
    },
    StatusFetched {
        job_id: JobId,
        result: Result<StatusUpdate, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("upload rejected with http status {0}")]
    UploadHttp(u16),
    #[error("upload response missing job id")]
    MissingJobId,
    #[error("status check failed with http status {0}")]
    PollHttp(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response body: {0}")]
    InvalidBody(String),
}
