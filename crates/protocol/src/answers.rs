use crate::catalog::{ResponseValue, QUESTION_COUNT};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    IndexOutOfRange(usize),
    Incomplete { answered: usize },
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerError::IndexOutOfRange(index) => {
                write!(f, "question index {index} out of range 0..{QUESTION_COUNT}")
            }
            AnswerError::Incomplete { answered } => {
                write!(f, "only {answered} of {QUESTION_COUNT} questions answered")
            }
        }
    }
}

impl std::error::Error for AnswerError {}

/// Responses keyed by 0-based question index. Later writes replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    slots: [Option<ResponseValue>; QUESTION_COUNT],
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, value: ResponseValue) -> Result<(), AnswerError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(AnswerError::IndexOutOfRange(index))?;
        *slot = Some(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<ResponseValue> {
        self.slots.get(index).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn first_unanswered(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots = [None; QUESTION_COUNT];
    }

    /// All 30 values in question order, or `Incomplete` if any is missing.
    pub fn values(&self) -> Result<Vec<ResponseValue>, AnswerError> {
        self.slots
            .iter()
            .map(|slot| {
                slot.ok_or(AnswerError::Incomplete {
                    answered: self.answered_count(),
                })
            })
            .collect()
    }
}
