//! The selection job pipeline.
//!
//! One invocation handles one job: read the caption file the download step
//! left in the work directory, merge it into chunks, run the selection
//! engine, and write the artifacts the renderer and the backend consume.
//! Source download, ASR, rendering, and uploads are separate collaborators.

use std::path::{Path, PathBuf};

use kklip_engine::{select_clips, SelectionOutcome, SelectionRequest};
use kklip_ranking::RankingClient;

use crate::callback::CallbackClient;
use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::JobLogger;
use crate::manifest::{build_edl, build_manifest, write_json};
use crate::transcript::{chunk_transcript, read_vtt};

/// Well-known file locations inside the job's work directory.
#[derive(Debug, Clone)]
pub struct JobPaths {
    pub input_dir: PathBuf,
    pub artifacts_dir: PathBuf,
}

impl JobPaths {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            input_dir: work_dir.join("input"),
            artifacts_dir: work_dir.join("artifacts"),
        }
    }

    /// Ensure required directories exist on disk.
    pub fn prepare(&self) -> WorkerResult<()> {
        std::fs::create_dir_all(&self.input_dir)?;
        std::fs::create_dir_all(&self.artifacts_dir)?;
        Ok(())
    }

    pub fn captions(&self) -> PathBuf {
        self.input_dir.join("captions.vtt")
    }

    pub fn transcript_json(&self) -> PathBuf {
        self.artifacts_dir.join("transcript.json")
    }

    pub fn chunks_json(&self) -> PathBuf {
        self.artifacts_dir.join("chunks.json")
    }

    pub fn edl_json(&self) -> PathBuf {
        self.artifacts_dir.join("edl.json")
    }

    pub fn manifest_json(&self) -> PathBuf {
        self.artifacts_dir.join("manifest.json")
    }
}

/// Run the selection pipeline for one job and write its artifacts.
pub async fn run_job(
    config: &WorkerConfig,
    ranking: &dyn RankingClient,
) -> WorkerResult<SelectionOutcome> {
    let logger = JobLogger::new(&config.job_id, "clip_selection");
    let paths = JobPaths::new(&config.work_dir);
    paths.prepare()?;

    let captions = paths.captions();
    if !captions.exists() {
        return Err(WorkerError::transcript(format!(
            "Caption file not found: {}",
            captions.display()
        )));
    }

    logger.log_start("Reading transcript");
    let entries = read_vtt(&captions)?;
    write_json(&paths.transcript_json(), &entries)?;

    let chunks = chunk_transcript(&entries);
    write_json(&paths.chunks_json(), &chunks)?;
    logger.log_progress(&format!(
        "Merged {} entries into {} chunks",
        entries.len(),
        chunks.len()
    ));

    let request = SelectionRequest {
        job_id: &config.job_id,
        language: &config.language,
        clip_count: config.clip_count,
        min_seconds: config.min_clip_seconds,
        max_seconds: config.max_clip_seconds,
        chunks: &chunks,
    };
    let outcome = select_clips(&request, ranking).await.require_clips()?;

    write_json(&paths.edl_json(), &build_edl(&config.job_id, &outcome.clips))?;
    write_json(
        &paths.manifest_json(),
        &build_manifest(&config.job_id, &outcome.clips, &outcome.provenance),
    )?;

    logger.log_completion(&format!("Selected {} clips", outcome.clips.len()));
    Ok(outcome)
}

/// Run one job end to end, reporting the result to the callback URL when
/// one is configured.
///
/// The failure callback is best effort: a job error is propagated even when
/// the callback itself cannot be delivered.
pub async fn run(config: &WorkerConfig, ranking: &dyn RankingClient) -> WorkerResult<()> {
    let logger = JobLogger::new(&config.job_id, "job_completion");
    let callback = match &config.callback_url {
        Some(url) => Some(CallbackClient::new(url.clone(), config.callback_token.clone())?),
        None => None,
    };

    match run_job(config, ranking).await {
        Ok(outcome) => {
            if let Some(callback) = &callback {
                callback
                    .notify_success(&config.job_id, outcome.clips.len())
                    .await?;
            }
            Ok(())
        }
        Err(e) => {
            logger.log_error(&format!("Job failed: {}", e));
            if let Some(callback) = &callback {
                if let Err(cb_err) = callback.notify_failure(&config.job_id, &e.to_string()).await
                {
                    logger.log_warning(&format!(
                        "Failure callback could not be delivered: {}",
                        cb_err
                    ));
                }
            }
            Err(e)
        }
    }
}
