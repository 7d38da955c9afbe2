use thiserror::Error;

use crate::api::ApiError;
use crate::job::JobStatus;
use crate::tracker::TrackerError;

#[derive(Debug, Error)]
pub enum SolfameError {
    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Local, synchronous failures detected before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not a recognized media link: {0:?}")]
    InvalidSourceUrl(String),

    #[error("unknown job status: {0:?}")]
    InvalidJobStatus(String),

    #[error("unknown voice part: {0:?}")]
    InvalidVoicePart(String),

    #[error("cannot apply {event} to a {from} job")]
    InvalidTransition { from: JobStatus, event: &'static str },

    #[error("a failed job needs a non-empty error description")]
    EmptyFailureReason,

    #[error("inconsistent job payload: {0}")]
    InconsistentJob(String),

    #[error("invalid transcription results: {0}")]
    InvalidResults(String),
}
