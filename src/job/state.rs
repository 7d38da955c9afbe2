use std::fmt;

use super::model::{AudioMetadata, Job, JobState, TranscriptionResults};
use super::status::JobStatus;
use crate::error::ValidationError;

/// Something the backend reports about a job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// Work has begun.
    Started,
    /// Work finished with results.
    Finished(TranscriptionResults),
    /// Work was aborted or the source was rejected.
    Aborted(String),
}

impl JobEvent {
    pub fn name(&self) -> &'static str {
        match self {
            JobEvent::Started => "start",
            JobEvent::Finished(_) => "finish",
            JobEvent::Aborted(_) => "abort",
        }
    }
}

impl fmt::Display for JobEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Job {
    /// Applies `event` and returns the new status.
    ///
    /// - `Pending` + `Started` moves to `Processing`.
    /// - `Processing` + `Finished` moves to `Completed`; results are validated first.
    /// - `Pending` or `Processing` + `Aborted` moves to `Failed`.
    /// - `Completed` and `Failed` are terminal.
    ///
    /// On error the job is left untouched.
    pub fn apply(&mut self, event: JobEvent) -> Result<JobStatus, ValidationError> {
        let from = self.status();
        let next = match (&self.state, event) {
            (JobState::Pending, JobEvent::Started) => JobState::Processing,
            (JobState::Processing, JobEvent::Finished(results)) => {
                results.validate()?;
                JobState::Completed(results)
            }
            (JobState::Pending | JobState::Processing, JobEvent::Aborted(reason)) => {
                if reason.trim().is_empty() {
                    return Err(ValidationError::EmptyFailureReason);
                }
                JobState::Failed(reason)
            }
            (_, event) => {
                return Err(ValidationError::InvalidTransition {
                    from,
                    event: event.name(),
                });
            }
        };

        self.state = next;
        self.touch();
        Ok(self.status())
    }

    /// Records what the backend learned about the source media.
    pub fn attach_metadata(&mut self, metadata: AudioMetadata) {
        self.metadata = Some(metadata);
        self.touch();
    }
}
