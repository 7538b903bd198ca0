pub(crate) mod app;
pub(crate) mod events;
pub(crate) mod terminal;
pub(crate) mod theme;
mod input;
mod render;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub(crate) use app::AppState;
pub(crate) use events::{Dispatcher, UiEvent};
pub(crate) use input::handle_key_event;
pub(crate) use render::draw_ui;
pub(crate) use terminal::{TerminalSession, Tty};

use crate::config::ClientConfig;
use crate::service::PredictionService;

pub(crate) async fn run_tui(
    service: Arc<dyn PredictionService>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(32);
    let cancel = CancellationToken::new();
    let dispatcher = Dispatcher::new(service, config.timeout, ui_tx, cancel.clone());
    let mut app = AppState::new(config.api_url.clone());
    dispatcher.spawn_health_check();

    let mut tty = TerminalSession::enter()?;
    let outcome = event_loop(tty.terminal(), &mut app, &mut ui_rx, &dispatcher);
    cancel.cancel();
    tty.restore()?;
    info!(answered = app.session.answers().answered_count(), "screener exiting");
    outcome
}

fn event_loop(
    terminal: &mut Tty,
    app: &mut AppState,
    ui_rx: &mut mpsc::Receiver<UiEvent>,
    dispatcher: &Dispatcher,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(event) = ui_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, dispatcher) {
                    return Ok(());
                }
            }
        }
    }
}
