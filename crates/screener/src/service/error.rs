use screening_protocol::QUESTION_COUNT;
use std::fmt;

/// Why a submission attempt ended without a result. The answer set is never
/// touched by any of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubmitError {
    Validation { answered: usize },
    Busy,
    Timeout,
    Server { status: u16, message: String },
    Transport(String),
}

impl SubmitError {
    pub(crate) fn server(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .map(|detail| detail.trim().to_string())
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| format!("Server error: {status}"));
        SubmitError::Server { status, message }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            SubmitError::Validation { .. } => "validation",
            SubmitError::Busy => "busy",
            SubmitError::Timeout => "timeout",
            SubmitError::Server { .. } => "server",
            SubmitError::Transport(_) => "transport",
        }
    }

    pub(crate) fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::Timeout | SubmitError::Server { .. } | SubmitError::Transport(_)
        )
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Validation { .. } => write!(
                f,
                "Please answer all {QUESTION_COUNT} questions before submitting."
            ),
            SubmitError::Busy => write!(f, "A submission is already in progress."),
            SubmitError::Timeout => write!(
                f,
                "Request timed out. Please check if the server is running and try again."
            ),
            SubmitError::Server { message, .. } => write!(f, "{message}"),
            SubmitError::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SubmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_prefers_detail() {
        let err = SubmitError::server(500, Some("model unavailable".to_string()));
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn server_error_falls_back_to_status() {
        assert_eq!(SubmitError::server(503, None).to_string(), "Server error: 503");
        assert_eq!(
            SubmitError::server(502, Some("  ".to_string())).to_string(),
            "Server error: 502"
        );
    }

    #[test]
    fn validation_is_not_retryable() {
        assert!(!SubmitError::Validation { answered: 3 }.is_retryable());
        assert!(SubmitError::Timeout.is_retryable());
        assert_eq!(
            SubmitError::Validation { answered: 3 }.to_string(),
            "Please answer all 30 questions before submitting."
        );
    }
}
