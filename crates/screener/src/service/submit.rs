use std::time::{Duration, Instant};

use screening_protocol::{PredictionResult, SubmissionRequest};
use tracing::{info, warn};

use super::{PredictionService, SubmitError};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues exactly one predict call. If `timeout` elapses first the call is
/// dropped, which aborts the in-flight HTTP request, and `Timeout` is returned.
pub(crate) async fn submit_with_timeout(
    service: &dyn PredictionService,
    request: &SubmissionRequest,
    timeout: Duration,
) -> Result<PredictionResult, SubmitError> {
    let started = Instant::now();
    let outcome = tokio::select! {
        outcome = service.predict(request) => outcome,
        _ = tokio::time::sleep(timeout) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "prediction request timed out");
            Err(SubmitError::Timeout)
        }
    };
    match &outcome {
        Ok(result) => info!(
            prediction = %result.prediction,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "submission succeeded"
        ),
        Err(err) => warn!(
            kind = err.kind(),
            error = %err,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "submission failed"
        ),
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_utils::{complete_request, severe_result, FakeService};

    #[tokio::test(start_paused = true)]
    async fn stalled_service_times_out() {
        let service = FakeService::stalled();
        let outcome = submit_with_timeout(&service, &complete_request(4), DEFAULT_TIMEOUT).await;
        assert_eq!(outcome.unwrap_err(), SubmitError::Timeout);
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_service_wins_the_race() {
        let service = FakeService::with_outcomes(vec![Ok(severe_result())]);
        let outcome = submit_with_timeout(&service, &complete_request(4), DEFAULT_TIMEOUT).await;
        assert_eq!(outcome.expect("result").prediction, "Severe");
        assert_eq!(service.requests(), vec![complete_request(4)]);
    }

    #[tokio::test(start_paused = true)]
    async fn server_errors_pass_through() {
        let service = FakeService::with_outcomes(vec![Err(SubmitError::server(
            500,
            Some("model unavailable".to_string()),
        ))]);
        let outcome = submit_with_timeout(&service, &complete_request(1), DEFAULT_TIMEOUT).await;
        assert_eq!(outcome.unwrap_err().to_string(), "model unavailable");
    }
}
