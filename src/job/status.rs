use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const NEUTRAL_DISPLAY_CLASS: &str = "text-gray-600 bg-gray-50";

/// Lifecycle status of a transcription job.
///
/// `Pending → Processing → Completed | Failed`, plus `Pending → Failed` when
/// the backend rejects a source before starting work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Completed,
        JobStatus::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Completed and failed jobs never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Display-hint token for this status.
    pub fn display_class(self) -> &'static str {
        match self {
            JobStatus::Pending => "text-yellow-600 bg-yellow-50",
            JobStatus::Processing => "text-blue-600 bg-blue-50",
            JobStatus::Completed => "text-green-600 bg-green-50",
            JobStatus::Failed => "text-red-600 bg-red-50",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidJobStatus(s.to_string()))
    }
}

/// Vocal part a transcription is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoicePart {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VoicePart {
    pub const ALL: [VoicePart; 4] = [
        VoicePart::Soprano,
        VoicePart::Alto,
        VoicePart::Tenor,
        VoicePart::Bass,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VoicePart::Soprano => "soprano",
            VoicePart::Alto => "alto",
            VoicePart::Tenor => "tenor",
            VoicePart::Bass => "bass",
        }
    }
}

impl fmt::Display for VoicePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VoicePart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VoicePart::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVoicePart(s.to_string()))
    }
}

/// Case-sensitive check that `value` is one of the four status literals.
pub fn is_valid_job_status(value: &str) -> bool {
    value.parse::<JobStatus>().is_ok()
}

/// Case-sensitive check that `value` is one of the four voice labels.
pub fn is_valid_voice_part(value: &str) -> bool {
    value.parse::<VoicePart>().is_ok()
}

/// Maps any status literal to a display-hint token. Unknown literals get the
/// neutral token.
pub fn status_display_class(value: &str) -> &'static str {
    match value.parse::<JobStatus>() {
        Ok(status) => status.display_class(),
        Err(_) => NEUTRAL_DISPLAY_CLASS,
    }
}
