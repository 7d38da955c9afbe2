use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{JobStatus, VoicePart};
use super::validate::validate_source_url;
use crate::error::ValidationError;

/// Descriptive attributes of the source media, known once the backend has
/// inspected it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMetadata {
    pub title: String,
    /// Length in seconds.
    pub duration: f64,
    pub format: String,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicalNote {
    pub pitch: String,
    pub duration: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub solfa_notation: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicePartTranscription {
    pub part: VoicePart,
    /// Ordered by `start_time`; the backend provides the ordering.
    pub notes: Vec<MusicalNote>,
    pub confidence: f64,
}

/// Output of a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionResults {
    pub key_signature: String,
    pub time_signature: String,
    pub tempo: f64,
    pub voice_parts: Vec<VoicePartTranscription>,
    pub overall_confidence: f64,
}

fn check_confidence(what: &str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidResults(format!(
            "{what} confidence {value} is outside [0, 1]"
        )))
    }
}

impl TranscriptionResults {
    /// Checks the global attributes, every confidence score, and note timing.
    /// Note ordering is not checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_signature.trim().is_empty() {
            return Err(ValidationError::InvalidResults("empty key signature".into()));
        }
        if self.time_signature.trim().is_empty() {
            return Err(ValidationError::InvalidResults("empty time signature".into()));
        }
        if !(self.tempo.is_finite() && self.tempo > 0.0) {
            return Err(ValidationError::InvalidResults(format!(
                "tempo must be positive, got {}",
                self.tempo
            )));
        }
        check_confidence("overall", self.overall_confidence)?;

        for voice in &self.voice_parts {
            check_confidence(voice.part.as_str(), voice.confidence)?;
            for note in &voice.notes {
                check_confidence("note", note.confidence)?;
                if note.start_time > note.end_time {
                    return Err(ValidationError::InvalidResults(format!(
                        "{} note {} ends at {} before it starts at {}",
                        voice.part, note.pitch, note.end_time, note.start_time
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Status together with the data that status carries. Results only exist on
/// a completed job and an error only on a failed one.
#[derive(Debug, Clone, PartialEq)]
pub enum JobState {
    Pending,
    Processing,
    Completed(TranscriptionResults),
    Failed(String),
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Pending => JobStatus::Pending,
            JobState::Processing => JobStatus::Processing,
            JobState::Completed(_) => JobStatus::Completed,
            JobState::Failed(_) => JobStatus::Failed,
        }
    }
}

/// A single transcription request and its outcome, as seen at one point in
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawJob", into = "RawJob")]
pub struct Job {
    id: String,
    source_url: String,
    pub(super) state: JobState,
    pub(super) metadata: Option<AudioMetadata>,
    created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a pending job. The source URL must pass
    /// [`validate_source_url`].
    pub fn new(
        id: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let source_url = source_url.into();
        if !validate_source_url(&source_url) {
            return Err(ValidationError::InvalidSourceUrl(source_url));
        }
        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            source_url,
            state: JobState::Pending,
            metadata: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn status(&self) -> JobStatus {
        self.state.status()
    }

    pub fn metadata(&self) -> Option<&AudioMetadata> {
        self.metadata.as_ref()
    }

    pub fn results(&self) -> Option<&TranscriptionResults> {
        match &self.state {
            JobState::Completed(results) => Some(results),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            JobState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    pub(super) fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}

/// Flat wire shape of a job, as the control plane sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJob {
    id: String,
    #[serde(alias = "sourceUrl")]
    youtube_url: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_metadata: Option<AudioMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    results: Option<TranscriptionResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TryFrom<RawJob> for Job {
    type Error = ValidationError;

    fn try_from(raw: RawJob) -> Result<Self, Self::Error> {
        let status: JobStatus = raw.status.parse()?;

        let state = match (status, raw.results, raw.error) {
            (_, Some(_), Some(_)) => {
                return Err(ValidationError::InconsistentJob(
                    "both results and error are present".into(),
                ));
            }
            (JobStatus::Pending, None, None) => JobState::Pending,
            (JobStatus::Processing, None, None) => JobState::Processing,
            (JobStatus::Completed, Some(results), None) => JobState::Completed(results),
            (JobStatus::Failed, None, Some(error)) => JobState::Failed(error),
            (JobStatus::Completed, None, _) => {
                return Err(ValidationError::InconsistentJob(
                    "completed job without results".into(),
                ));
            }
            (JobStatus::Failed, _, None) => {
                return Err(ValidationError::InconsistentJob(
                    "failed job without an error".into(),
                ));
            }
            (status, _, _) => {
                return Err(ValidationError::InconsistentJob(format!(
                    "{status} job carries results or an error"
                )));
            }
        };

        if raw.updated_at < raw.created_at {
            return Err(ValidationError::InconsistentJob(
                "updatedAt is earlier than createdAt".into(),
            ));
        }

        Ok(Job {
            id: raw.id,
            source_url: raw.youtube_url,
            state,
            metadata: raw.audio_metadata,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl From<Job> for RawJob {
    fn from(job: Job) -> Self {
        let status = job.status().as_str().to_string();
        let (results, error) = match job.state {
            JobState::Completed(results) => (Some(results), None),
            JobState::Failed(error) => (None, Some(error)),
            JobState::Pending | JobState::Processing => (None, None),
        };
        RawJob {
            id: job.id,
            youtube_url: job.source_url,
            status,
            created_at: job.created_at,
            updated_at: job.updated_at,
            audio_metadata: job.metadata,
            results,
            error,
        }
    }
}
