//! HTTP client for the pipeline service: one call to start a run, one to
//! read its current snapshot. Polling policy lives in `run_poller`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::schema::{PipelineInput, PipelineRun};

/// The seam between flows and the wire. Fakes implement this in tests;
/// `PipelineClient` is the production implementation.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Start a run of the given saved pipeline. Never retried here; a
    /// failed start is the caller's decision to repeat.
    async fn start_run(
        &self,
        saved_item_id: &str,
        inputs: &[PipelineInput],
    ) -> Result<PipelineRun>;

    /// Fetch the current snapshot of a run.
    async fn run_status(&self, run_id: &str) -> Result<PipelineRun>;
}

pub struct PipelineClient {
    base_url: String,
    api_key: String,
    user_id: String,
    client: Client,
}

impl PipelineClient {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            user_id: config.user_id.clone(),
            client,
        })
    }
}

#[async_trait]
impl PipelineApi for PipelineClient {
    async fn start_run(
        &self,
        saved_item_id: &str,
        inputs: &[PipelineInput],
    ) -> Result<PipelineRun> {
        let url = format!("{}/api/v1/start_pipeline", self.base_url);
        let body = json!({
            "user_id": self.user_id,
            "saved_item_id": saved_item_id,
            "pipeline_inputs": inputs,
        });

        debug!(saved_item_id, "starting pipeline run");
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(service_error(resp).await);
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| PipelineError::Protocol(format!("start response is not JSON: {e}")))?;
        let run_id = data
            .get("run_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PipelineError::Protocol("start response missing run_id".to_string()))?;

        info!(run_id, "pipeline run started");
        Ok(PipelineRun::new_pending(run_id.to_string()))
    }

    async fn run_status(&self, run_id: &str) -> Result<PipelineRun> {
        let url = format!("{}/api/v1/get_pl_run", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("run_id", run_id), ("user_id", self.user_id.as_str())])
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(service_error(resp).await);
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| PipelineError::Protocol(format!("status response is not JSON: {e}")))?;
        PipelineRun::from_status_value(run_id, &data)
    }
}

async fn service_error(resp: reqwest::Response) -> PipelineError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    PipelineError::ExternalService {
        status,
        message: error_message(&body),
    }
}

// The service usually wraps errors as {"message": "..."}; fall back to the
// raw body when it doesn't.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string())
}
