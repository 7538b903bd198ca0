use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use screening_protocol::{ErrorBody, HealthResponse, PredictionResult, SubmissionRequest};
use tracing::{debug, info, warn};

use super::http_utils::{escape_log_body, ServiceEndpoints};
use super::{PredictionService, SubmitError};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);
const LOG_BODY_CHARS: usize = 512;
static HTTP_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct HttpPredictionService {
    client: Client,
    predict_url: String,
    health_url: String,
}

impl HttpPredictionService {
    pub(crate) fn new(base_url: &str) -> anyhow::Result<Self> {
        let endpoints = ServiceEndpoints::from_base(base_url).map_err(anyhow::Error::msg)?;
        // no client-wide timeouts: predict is bounded by the caller's race alone
        let client = Client::builder()
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            predict_url: endpoints.predict,
            health_url: endpoints.health,
        })
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &SubmissionRequest) -> Result<PredictionResult, SubmitError> {
        let request_id = HTTP_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        debug!(request_id, url = %self.predict_url, answers = request.len(), "predict start");
        let response = self
            .client
            .post(&self.predict_url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error("predict", request_id, err))?;
        let (status, body) = read_response(response, request_id).await?;
        info!(
            request_id,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "predict finished"
        );
        if status / 100 != 2 {
            return Err(server_error(status, &body));
        }
        serde_json::from_str(&body).map_err(|err| {
            warn!(
                request_id,
                error = %err,
                body = %escape_log_body(&body, LOG_BODY_CHARS),
                "predict parse error"
            );
            SubmitError::Transport(format!("invalid prediction response: {err}"))
        })
    }

    async fn health(&self) -> Result<HealthResponse, SubmitError> {
        let request_id = HTTP_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
        let response = self
            .client
            .get(&self.health_url)
            .header(ACCEPT, "application/json")
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|err| transport_error("health", request_id, err))?;
        let (status, body) = read_response(response, request_id).await?;
        if status / 100 != 2 {
            return Err(server_error(status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|err| SubmitError::Transport(format!("invalid health response: {err}")))
    }
}

async fn read_response(response: Response, request_id: u64) -> Result<(u16, String), SubmitError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|err| transport_error("read body", request_id, err))?;
    debug!(
        request_id,
        status,
        body_len = body.len(),
        body = %escape_log_body(&body, LOG_BODY_CHARS),
        "http response"
    );
    Ok((status, body))
}

fn server_error(status: u16, body: &str) -> SubmitError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail);
    SubmitError::server(status, detail)
}

/// `Timeout` is reserved for the submit race, so every reqwest failure lands
/// here as `Transport`, including the health check's own request timeout.
fn transport_error(stage: &str, request_id: u64, err: reqwest::Error) -> SubmitError {
    warn!(
        request_id,
        stage,
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        error = %err,
        "reqwest error"
    );
    SubmitError::Transport(err.to_string())
}
