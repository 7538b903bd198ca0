mod error;
mod http;
mod http_utils;
mod submit;
#[cfg(test)]
pub(crate) mod test_utils;

use async_trait::async_trait;
use screening_protocol::{HealthResponse, PredictionResult, SubmissionRequest};

pub(crate) use error::SubmitError;
pub(crate) use http::HttpPredictionService;
pub(crate) use submit::{submit_with_timeout, DEFAULT_TIMEOUT};

/// The external scoring service. Everything past this seam is a black box.
#[async_trait]
pub(crate) trait PredictionService: Send + Sync {
    async fn predict(&self, request: &SubmissionRequest) -> Result<PredictionResult, SubmitError>;

    async fn health(&self) -> Result<HealthResponse, SubmitError>;
}
