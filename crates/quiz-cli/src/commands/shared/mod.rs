pub mod job;

pub use job::{MediaJobRequest, TextJobRequest, make_rng, run_media_job, run_text_job};
