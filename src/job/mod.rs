mod model;
mod state;
mod status;
mod validate;

pub use model::{
    AudioMetadata, Job, JobState, MusicalNote, TranscriptionResults, VoicePartTranscription,
};
pub use state::JobEvent;
pub use status::{
    JobStatus, VoicePart, is_valid_job_status, is_valid_voice_part, status_display_class,
};
pub use validate::{format_duration, validate_source_url};
