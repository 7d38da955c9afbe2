pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ClientConfig, DEFAULT_API_BASE, DEFAULT_PROCESSING_BASE, JobApi};
pub use error::ApiError;
pub use types::{
    ApiResponse, CreateJobRequest, HealthResponse, JobOptions, OutputFormat, ProcessAudioRequest,
    ProcessAudioResponse, ServiceHealth,
};
