//! Completion callback to the backend.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::error::{WorkerError, WorkerResult};

const CALLBACK_TIMEOUT: Duration = Duration::from_secs(15);

/// Payload posted to the callback URL when a job finishes.
#[derive(Debug, Serialize)]
pub struct CallbackPayload<'a> {
    pub job_id: &'a str,
    pub status: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

/// Client notifying the backend about job completion.
pub struct CallbackClient {
    url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl CallbackClient {
    pub fn new(url: impl Into<String>, token: Option<String>) -> WorkerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(CALLBACK_TIMEOUT)
            .build()
            .map_err(|e| WorkerError::callback(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            token,
            client,
        })
    }

    /// Report a successful run and the number of clips produced.
    pub async fn notify_success(&self, job_id: &str, clips: usize) -> WorkerResult<()> {
        self.post(&CallbackPayload {
            job_id,
            status: "SUCCEEDED",
            clips: Some(clips),
            error: None,
        })
        .await
    }

    /// Report a failed run with its error message.
    pub async fn notify_failure(&self, job_id: &str, error: &str) -> WorkerResult<()> {
        self.post(&CallbackPayload {
            job_id,
            status: "FAILED",
            clips: None,
            error: Some(error),
        })
        .await
    }

    async fn post(&self, payload: &CallbackPayload<'_>) -> WorkerResult<()> {
        let mut builder = self.client.post(&self.url).json(payload);
        if let Some(token) = &self.token {
            builder = builder.header("x-callback-token", token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| WorkerError::callback(format!("Callback request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(WorkerError::callback(format!(
                "Callback returned {}",
                response.status()
            )));
        }

        info!(
            job_id = %payload.job_id,
            status = %payload.status,
            "Callback delivered"
        );
        Ok(())
    }
}
