//! Pipeline runs against a real work directory and stubbed collaborators.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kklip_models::SelectionMode;
use kklip_ranking::{RankingClient, RankingError, RankingRequest, RankingResult, SelectionItem};
use kklip_worker::pipeline::{run, run_job, JobPaths};
use kklip_worker::{WorkerConfig, WorkerError};

struct FailingRanking;

#[async_trait]
impl RankingClient for FailingRanking {
    fn source(&self) -> &str {
        "stub-failing"
    }

    async fn select(&self, _request: &RankingRequest<'_>) -> RankingResult<Vec<SelectionItem>> {
        Err(RankingError::unavailable("connection refused"))
    }
}

fn test_config(work_dir: &Path) -> WorkerConfig {
    WorkerConfig {
        job_id: "job-123".to_string(),
        clip_count: 2,
        min_clip_seconds: 30.0,
        max_clip_seconds: 60.0,
        language: "auto".to_string(),
        ranking_api_base: "http://ranking.invalid".to_string(),
        ranking_api_key: None,
        ranking_timeout: Duration::from_secs(20),
        callback_url: None,
        callback_token: None,
        work_dir: work_dir.to_path_buf(),
    }
}

/// Write a caption file with one `step`-second cue after another, covering
/// `total` seconds.
fn write_captions(work_dir: &Path, total: u32, step: u32) {
    let input_dir = work_dir.join("input");
    std::fs::create_dir_all(&input_dir).unwrap();

    let mut vtt = String::from("WEBVTT\n\n");
    let mut t = 0;
    let mut n = 1;
    while t < total {
        let end = (t + step).min(total);
        vtt.push_str(&format!(
            "00:{:02}:{:02}.000 --> 00:{:02}:{:02}.000\ncue number {}\n\n",
            t / 60,
            t % 60,
            end / 60,
            end % 60,
            n
        ));
        t += step;
        n += 1;
    }
    std::fs::write(input_dir.join("captions.vtt"), vtt).unwrap();
}

#[tokio::test]
async fn test_run_job_writes_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_captions(dir.path(), 200, 40);

    let config = test_config(dir.path());
    let outcome = run_job(&config, &FailingRanking).await.unwrap();

    assert_eq!(outcome.clips.len(), 2);
    assert_eq!(outcome.provenance.mode, SelectionMode::Heuristic);

    let paths = JobPaths::new(dir.path());
    for artifact in [
        paths.transcript_json(),
        paths.chunks_json(),
        paths.edl_json(),
        paths.manifest_json(),
    ] {
        assert!(artifact.exists(), "missing {}", artifact.display());
    }

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(paths.manifest_json()).unwrap()).unwrap();
    assert_eq!(manifest["job_id"], "job-123");
    assert_eq!(manifest["selection"]["mode"], "heuristic");
    assert_eq!(manifest["clips"].as_array().unwrap().len(), 2);
    assert_eq!(manifest["clips"][0]["file"], "clip_01.mp4");
}

#[tokio::test]
async fn test_run_job_missing_captions() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let err = run_job(&config, &FailingRanking).await.unwrap_err();
    assert!(matches!(err, WorkerError::Transcript(_)));
}

#[tokio::test]
async fn test_run_job_short_transcript_is_terminal() {
    let dir = tempfile::tempdir().unwrap();
    // 20 seconds of material against a 30 second floor.
    write_captions(dir.path(), 20, 20);

    let config = test_config(dir.path());
    let err = run_job(&config, &FailingRanking).await.unwrap_err();
    assert!(matches!(err, WorkerError::Selection(_)));
}

#[tokio::test]
async fn test_run_reports_success_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/internal/jobs/callback"))
        .and(header("x-callback-token", "secret"))
        .and(body_partial_json(serde_json::json!({
            "job_id": "job-123",
            "status": "SUCCEEDED",
            "clips": 2,
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_captions(dir.path(), 200, 40);

    let mut config = test_config(dir.path());
    config.callback_url = Some(format!("{}/internal/jobs/callback", server.uri()));
    config.callback_token = Some("secret".to_string());

    run(&config, &FailingRanking).await.unwrap();
}

#[tokio::test]
async fn test_run_propagates_job_error_when_callback_unreachable() {
    let dir = tempfile::tempdir().unwrap();

    // No captions, and nothing is listening on the callback port. The job
    // error must still come through.
    let mut config = test_config(dir.path());
    config.callback_url = Some("http://127.0.0.1:1/internal/jobs/callback".to_string());

    let err = run(&config, &FailingRanking).await.unwrap_err();
    assert!(matches!(err, WorkerError::Transcript(_)));
}

#[tokio::test]
async fn test_run_reports_failure_callback_and_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/internal/jobs/callback"))
        .and(body_partial_json(serde_json::json!({
            "job_id": "job-123",
            "status": "FAILED",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    let mut config = test_config(dir.path());
    config.callback_url = Some(format!("{}/internal/jobs/callback", server.uri()));

    let err = run(&config, &FailingRanking).await.unwrap_err();
    assert!(matches!(err, WorkerError::Transcript(_)));
}
