use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use screening_protocol::{
    AnswerSet, HealthResponse, PredictionResult, ResponseValue, SubmissionRequest, QUESTION_COUNT,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::{PredictionService, SubmitError};

pub(crate) fn complete_answers(value: u8) -> AnswerSet {
    let value = ResponseValue::new(value).expect("value");
    let mut answers = AnswerSet::new();
    for index in 0..QUESTION_COUNT {
        answers.set(index, value).expect("set");
    }
    answers
}

pub(crate) fn complete_request(value: u8) -> SubmissionRequest {
    SubmissionRequest::from_answers(&complete_answers(value)).expect("request")
}

pub(crate) fn severe_result_json() -> Value {
    json!({
        "prediction": "Severe",
        "severity_level": 3,
        "confidence": 0.92,
        "probabilities": {"none": 0.01, "mild": 0.02, "moderate": 0.05, "severe": 0.92},
        "description": "Severe indicators detected. We strongly recommend seeking professional help immediately.",
        "disclaimer": "This tool is for educational and informational purposes only."
    })
}

pub(crate) fn severe_result() -> PredictionResult {
    serde_json::from_value(severe_result_json()).expect("result")
}

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// Replays scripted outcomes in order and records every request it sees.
pub(crate) struct FakeService {
    outcomes: Mutex<VecDeque<Result<PredictionResult, SubmitError>>>,
    requests: Mutex<Vec<SubmissionRequest>>,
    stalled: bool,
}

impl FakeService {
    pub(crate) fn with_outcomes(outcomes: Vec<Result<PredictionResult, SubmitError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
            stalled: false,
        }
    }

    /// Never answers.
    pub(crate) fn stalled() -> Self {
        Self {
            stalled: true,
            ..Self::with_outcomes(Vec::new())
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionService for FakeService {
    async fn predict(&self, request: &SubmissionRequest) -> Result<PredictionResult, SubmitError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.stalled {
            std::future::pending::<()>().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SubmitError::Transport("no scripted outcome".to_string())))
    }

    async fn health(&self) -> Result<HealthResponse, SubmitError> {
        Ok(HealthResponse {
            status: "healthy".to_string(),
            model_loaded: true,
            version: "1.0.0".to_string(),
        })
    }
}
