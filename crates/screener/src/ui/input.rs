use crossterm::event::{KeyCode, KeyEvent};
use screening_protocol::ResponseValue;
use tracing::debug;

use super::app::AppState;
use super::events::Dispatcher;
use crate::session::Phase;

/// Returns true when the app should exit.
pub(crate) fn handle_key_event(key: KeyEvent, app: &mut AppState, dispatcher: &Dispatcher) -> bool {
    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    if matches!(app.session.phase(), Phase::Succeeded(_)) {
        return handle_result_key(key, app, dispatcher);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char(ch @ '1'..='4') => {
            let value = ch.to_digit(10).and_then(|digit| ResponseValue::new(digit as u8));
            if let Some(value) = value {
                app.answer_selected(value);
            }
        }
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => submit(app, dispatcher),
        KeyCode::Esc => {
            app.session.dismiss_error();
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset();
        }
        KeyCode::Char('h') | KeyCode::Char('H') => dispatcher.spawn_health_check(),
        _ => {}
    }
    false
}

fn handle_result_key(key: KeyEvent, app: &mut AppState, dispatcher: &Dispatcher) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        // only an explicit retake clears the answers
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset();
        }
        KeyCode::Char('h') | KeyCode::Char('H') => dispatcher.spawn_health_check(),
        _ => {}
    }
    false
}

fn submit(app: &mut AppState, dispatcher: &Dispatcher) {
    match app.session.begin_submit() {
        Ok(ticket) => dispatcher.spawn_submission(ticket),
        Err(err) => {
            debug!(kind = err.kind(), "submit not started");
            if let Some(index) = app.session.answers().first_unanswered() {
                app.selected = index;
                app.list_state.select(Some(index));
            }
        }
    }
}
