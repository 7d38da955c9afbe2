use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::api::{ApiError, CreateJobRequest, JobApi, JobOptions};
use crate::error::ValidationError;
use crate::job::{Job, JobStatus, validate_source_url};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("job still not finished after {polls} polls")]
    GaveUp { polls: u32 },
}

/// Submits jobs and follows them until they reach a terminal status.
///
/// Polling is caller-side policy: each poll is one plain `get_job` call, and
/// the first transport failure ends the wait.
pub struct JobTracker<A> {
    api: A,
    poll_interval: Duration,
    max_polls: Option<u32>,
}

impl<A: JobApi> JobTracker<A> {
    pub fn new(api: A, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            max_polls: None,
        }
    }

    /// Stop waiting after `max_polls` status reads.
    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Validates `url` locally, then asks the control plane to create a job.
    /// An invalid URL never reaches the network.
    pub async fn submit(&self, url: &str, options: JobOptions) -> Result<Job, TrackerError> {
        if !validate_source_url(url) {
            return Err(ValidationError::InvalidSourceUrl(url.to_string()).into());
        }
        let job = self
            .api
            .create_job(&CreateJobRequest::new(url, options))
            .await?;
        log::info!("submitted job {} ({})", job.id(), job.status());
        Ok(job)
    }

    /// Polls `id` until the job is completed or failed and returns that
    /// snapshot. `on_update` sees every snapshot whose status differs from
    /// the previous one, including the first.
    ///
    /// A failed job is a normal return value; inspect its status and error.
    pub async fn wait_for_completion<F>(
        &self,
        id: &str,
        mut on_update: F,
    ) -> Result<Job, TrackerError>
    where
        F: FnMut(&Job),
    {
        let mut last: Option<JobStatus> = None;
        let mut polls = 0u32;

        loop {
            let job = self.api.get_job(id).await?;
            polls += 1;

            if last != Some(job.status()) {
                log::info!("job {id} is {}", job.status());
                last = Some(job.status());
                on_update(&job);
            }

            if job.is_terminal() {
                return Ok(job);
            }

            if let Some(max) = self.max_polls
                && polls >= max
            {
                return Err(TrackerError::GaveUp { polls });
            }

            sleep(self.poll_interval).await;
        }
    }
}
