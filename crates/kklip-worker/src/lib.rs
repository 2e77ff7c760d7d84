//! Clip selection worker.
//!
//! Wraps the selection engine in a one-job-per-invocation pipeline: caption
//! ingestion, chunk merging, the selection run itself, artifact assembly
//! (EDL and manifest), and the completion callback to the backend.

pub mod callback;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod transcript;

pub use callback::CallbackClient;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::JobLogger;
