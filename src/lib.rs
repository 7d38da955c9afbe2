//! Job lifecycle model and HTTP client for SolfaMe transcription jobs.
//!
//! [`job`] holds the pure model: statuses, voice parts, validation helpers and
//! the job state machine. [`api`] talks to the control plane and the
//! processing service. [`tracker`] combines both into submit-and-follow.

pub mod api;
pub mod config;
pub mod error;
pub mod job;
pub mod tracker;

pub use error::{SolfameError, ValidationError};
