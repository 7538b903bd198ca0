use screening_protocol::{AnswerSet, PredictionResult, ResponseValue, SubmissionRequest};
use tracing::{debug, info};

use crate::service::SubmitError;

/// Where the questionnaire is. Only one of these holds at a time, so a
/// pending request and a displayed result can never coexist.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Phase {
    Collecting,
    Submitting { attempt: u64 },
    Succeeded(PredictionResult),
    Failed(SubmitError),
}

/// Handed out by [`Session::begin_submit`]; the attempt id must come back
/// with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmitTicket {
    pub(crate) attempt: u64,
    pub(crate) request: SubmissionRequest,
}

#[derive(Debug)]
pub(crate) struct Session {
    answers: AnswerSet,
    phase: Phase,
    next_attempt: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            answers: AnswerSet::new(),
            phase: Phase::Collecting,
            next_attempt: 1,
        }
    }

    pub(crate) fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub(crate) fn phase(&self) -> &Phase {
        &self.phase
    }

    pub(crate) fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.answers.is_complete()
    }

    pub(crate) fn result(&self) -> Option<&PredictionResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub(crate) fn error(&self) -> Option<&SubmitError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Records a response. Refused while a request is in flight or a result
    /// is on screen. Answering after a failure returns to collecting.
    pub(crate) fn set_answer(&mut self, index: usize, value: ResponseValue) -> bool {
        if matches!(self.phase, Phase::Submitting { .. } | Phase::Succeeded(_)) {
            return false;
        }
        if self.answers.set(index, value).is_err() {
            return false;
        }
        if matches!(self.phase, Phase::Failed(_)) {
            self.phase = Phase::Collecting;
        }
        true
    }

    pub(crate) fn begin_submit(&mut self) -> Result<SubmitTicket, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::Busy);
        }
        let request = match SubmissionRequest::from_answers(&self.answers) {
            Ok(request) => request,
            Err(_) => {
                let err = SubmitError::Validation {
                    answered: self.answers.answered_count(),
                };
                debug!(answered = self.answers.answered_count(), "submit rejected, incomplete");
                self.phase = Phase::Failed(err.clone());
                return Err(err);
            }
        };
        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.phase = Phase::Submitting { attempt };
        info!(attempt, "submission started");
        Ok(SubmitTicket { attempt, request })
    }

    /// Applies an outcome if it belongs to the pending attempt. Anything
    /// else is a late or duplicate delivery and is dropped.
    pub(crate) fn finish(
        &mut self,
        attempt: u64,
        outcome: Result<PredictionResult, SubmitError>,
    ) -> bool {
        match self.phase {
            Phase::Submitting { attempt: pending } if pending == attempt => {}
            _ => {
                debug!(attempt, "ignoring stale submission outcome");
                return false;
            }
        }
        self.phase = match outcome {
            Ok(result) => Phase::Succeeded(result),
            Err(err) => Phase::Failed(err),
        };
        true
    }

    /// Retake: drops the result or error and every answer.
    pub(crate) fn reset(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.answers.clear();
        self.phase = Phase::Collecting;
        true
    }

    /// Leaves the failure screen with answers intact.
    pub(crate) fn dismiss_error(&mut self) -> bool {
        if !matches!(self.phase, Phase::Failed(_)) {
            return false;
        }
        self.phase = Phase::Collecting;
        true
    }
}
