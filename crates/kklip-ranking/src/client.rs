//! HTTP ranking client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{RankingError, RankingResult};
use crate::wire::{RankingRequest, RankingResponse, SelectionItem};

/// Boundary trait for the external ranking call.
///
/// The engine only depends on this trait; tests substitute stubs for it.
#[async_trait]
pub trait RankingClient: Send + Sync {
    /// Configured endpoint base, recorded as selection provenance.
    fn source(&self) -> &str;

    /// Request an ordered selection for the given candidates.
    async fn select(&self, request: &RankingRequest<'_>) -> RankingResult<Vec<SelectionItem>>;
}

/// Ranking client talking to the HTTP ranking service.
pub struct HttpRankingClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpRankingClient {
    /// Create a client for the given endpoint base.
    ///
    /// `timeout` bounds the whole request; a timeout surfaces as
    /// [`RankingError::Unavailable`].
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> RankingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RankingError::unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/selections", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RankingClient for HttpRankingClient {
    fn source(&self) -> &str {
        &self.base_url
    }

    async fn select(&self, request: &RankingRequest<'_>) -> RankingResult<Vec<SelectionItem>> {
        let url = self.endpoint();
        debug!(
            job_id = %request.job_id,
            candidates = request.candidates.len(),
            clip_count = request.clip_count,
            "Requesting ranked selection"
        );

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| RankingError::unavailable(format!("Ranking request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RankingError::unavailable(format!(
                "Ranking service returned {}: {}",
                status, body
            )));
        }

        let parsed: RankingResponse = response
            .json()
            .await
            .map_err(|e| RankingError::malformed(format!("Failed to parse ranking response: {}", e)))?;

        let items: Vec<SelectionItem> = parsed
            .items
            .into_iter()
            .filter_map(|raw| raw.normalize())
            .collect();

        info!(
            job_id = %request.job_id,
            items = items.len(),
            "Ranked selection received"
        );
        Ok(items)
    }
}
