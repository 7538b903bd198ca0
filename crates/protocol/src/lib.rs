use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub mod answers;
pub mod catalog;
pub mod severity;

pub use answers::{AnswerError, AnswerSet};
pub use catalog::{
    question, question_key, ResponseOption, ResponseValue, DISCLAIMER, INSTRUCTIONS, QUESTIONS,
    QUESTION_COUNT, RESPONSE_OPTIONS,
};
pub use severity::Severity;

/// Body of `POST /predict`: `{"q1": 1, ..., "q30": 4}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    values: Vec<ResponseValue>,
}

impl SubmissionRequest {
    pub fn from_answers(answers: &AnswerSet) -> Result<Self, AnswerError> {
        let values = answers.values()?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (String, u8)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(index, value)| (question_key(index), value.get()))
    }
}

impl Serialize for SubmissionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.entries() {
            map.serialize_entry(&key, &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub severity_level: i64,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
    pub description: String,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

impl PredictionResult {
    pub fn severity(&self) -> Option<Severity> {
        Severity::parse(&self.prediction).or_else(|| Severity::from_level(self.severity_level))
    }
}

fn default_disclaimer() -> String {
    DISCLAIMER.to_string()
}

/// Response of the service health endpoint (`GET /`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    #[serde(default = "default_version")]
    pub version: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" && self.model_loaded
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Optional error payload on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
