//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{WorkerError, WorkerResult};

/// Worker configuration, one job per process invocation.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Job identifier
    pub job_id: String,
    /// Number of clips to produce
    pub clip_count: usize,
    /// Minimum clip duration in seconds
    pub min_clip_seconds: f64,
    /// Maximum clip duration in seconds
    pub max_clip_seconds: f64,
    /// Output language (`auto` for detection)
    pub language: String,
    /// Ranking service endpoint base
    pub ranking_api_base: String,
    /// Optional ranking service API key
    pub ranking_api_key: Option<String>,
    /// Ranking request timeout
    pub ranking_timeout: Duration,
    /// Backend callback URL, if completion should be reported
    pub callback_url: Option<String>,
    /// Token sent with the callback
    pub callback_token: Option<String>,
    /// Work directory holding input and artifacts
    pub work_dir: PathBuf,
}

fn require_env(name: &str) -> WorkerResult<String> {
    std::env::var(name)
        .map_err(|_| WorkerError::config(format!("Missing required env var: {}", name)))
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> WorkerResult<Self> {
        let clip_count: usize = require_env("CLIP_COUNT")?
            .parse()
            .map_err(|_| WorkerError::config("CLIP_COUNT must be a positive integer"))?;

        Ok(Self {
            job_id: require_env("JOB_ID")?,
            clip_count,
            min_clip_seconds: parse_env("MIN_CLIP_SECONDS", 30.0),
            max_clip_seconds: parse_env("MAX_CLIP_SECONDS", 60.0),
            language: std::env::var("OUTPUT_LANGUAGE").unwrap_or_else(|_| "auto".to_string()),
            ranking_api_base: require_env("RANKING_API_BASE")?,
            ranking_api_key: std::env::var("RANKING_API_KEY").ok(),
            ranking_timeout: Duration::from_secs(parse_env("RANKING_TIMEOUT_SECONDS", 20)),
            callback_url: std::env::var("CALLBACK_URL").ok(),
            callback_token: std::env::var("CALLBACK_TOKEN").ok(),
            work_dir: PathBuf::from(
                std::env::var("WORKER_WORK_DIR").unwrap_or_else(|_| "/work".to_string()),
            ),
        })
    }
}
