use ratatui::widgets::ListState;
use screening_protocol::{HealthResponse, ResponseValue, QUESTION_COUNT};

use super::events::UiEvent;
use crate::present::ResultView;
use crate::session::Session;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum HealthState {
    #[default]
    Checking,
    Ready(HealthResponse),
    Unreachable(String),
}

pub(crate) struct AppState {
    pub(crate) session: Session,
    pub(crate) api_url: String,
    pub(crate) health: HealthState,
    pub(crate) selected: usize,
    pub(crate) list_state: ListState,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        let mut app = Self {
            session: Session::new(),
            api_url: api_url.into(),
            health: HealthState::default(),
            selected: 0,
            list_state: ListState::default(),
            confirm_quit: false,
        };
        app.sync_selection();
        app
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submission { attempt, outcome } => {
                if self.session.finish(attempt, outcome) {
                    if let Some(result) = self.session.result() {
                        ResultView::from_result(result).warn_on_mismatch();
                    }
                }
            }
            UiEvent::Health(outcome) => {
                self.health = match outcome {
                    Ok(health) => HealthState::Ready(health),
                    Err(err) => HealthState::Unreachable(err.to_string()),
                };
            }
        }
    }

    /// Records `value` for the focused question and moves to the next
    /// unanswered one after it.
    pub(crate) fn answer_selected(&mut self, value: ResponseValue) -> bool {
        if !self.session.set_answer(self.selected, value) {
            return false;
        }
        let answers = self.session.answers();
        let next = (1..QUESTION_COUNT)
            .map(|offset| (self.selected + offset) % QUESTION_COUNT)
            .find(|index| answers.get(*index).is_none());
        if let Some(next) = next {
            self.selected = next;
        } else if self.selected + 1 < QUESTION_COUNT {
            self.selected += 1;
        }
        self.sync_selection();
        true
    }

    pub(crate) fn select_next(&mut self) {
        self.selected = (self.selected + 1) % QUESTION_COUNT;
        self.sync_selection();
    }

    pub(crate) fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = QUESTION_COUNT - 1;
        } else {
            self.selected -= 1;
        }
        self.sync_selection();
    }

    pub(crate) fn reset(&mut self) -> bool {
        if !self.session.reset() {
            return false;
        }
        self.selected = 0;
        self.sync_selection();
        true
    }

    fn sync_selection(&mut self) {
        self.list_state.select(Some(self.selected));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_utils::severe_result;
    use crate::service::SubmitError;

    fn value(v: u8) -> ResponseValue {
        ResponseValue::new(v).expect("value")
    }

    #[test]
    fn answering_advances_to_next_unanswered() {
        let mut app = AppState::new("http://localhost:8000");
        app.selected = 2;
        app.session.set_answer(3, value(1));
        assert!(app.answer_selected(value(4)));
        assert_eq!(app.selected, 4);
        assert_eq!(app.session.answers().get(2), Some(value(4)));
    }

    #[test]
    fn answering_wraps_to_earlier_gaps() {
        let mut app = AppState::new("http://localhost:8000");
        app.selected = QUESTION_COUNT - 1;
        app.answer_selected(value(2));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = AppState::new("http://localhost:8000");
        app.select_prev();
        assert_eq!(app.selected, QUESTION_COUNT - 1);
        app.select_next();
        assert_eq!(app.selected, 0);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn submission_event_lands_in_session() {
        let mut app = AppState::new("http://localhost:8000");
        for index in 0..QUESTION_COUNT {
            app.session.set_answer(index, value(4));
        }
        let ticket = app.session.begin_submit().expect("ticket");
        app.handle_event(UiEvent::Submission {
            attempt: ticket.attempt,
            outcome: Ok(severe_result()),
        });
        assert!(app.session.result().is_some());
        assert!(app.reset());
        assert!(!app.session.is_complete());
    }

    #[test]
    fn health_failure_is_shown_as_unreachable() {
        let mut app = AppState::new("http://localhost:8000");
        app.handle_event(UiEvent::Health(Err(SubmitError::Transport(
            "connection refused".to_string(),
        ))));
        assert_eq!(
            app.health,
            HealthState::Unreachable("connection refused".to_string())
        );
    }
}
