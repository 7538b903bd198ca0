use std::io;
use std::sync::Once;

use anyhow::Context;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub(crate) type Tty = Terminal<CrosstermBackend<io::Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Raw mode plus alternate screen for the lifetime of the value. Dropping it
/// without `restore` (early return, panic) still hands the terminal back.
pub(crate) struct TerminalSession {
    terminal: Tty,
    restored: bool,
}

impl TerminalSession {
    pub(crate) fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = stdout.execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        install_panic_hook();
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub(crate) fn terminal(&mut self) -> &mut Tty {
        &mut self.terminal
    }

    pub(crate) fn restore(mut self) -> anyhow::Result<()> {
        self.restored = true;
        leave(&mut self.terminal)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.restored {
            let _ = leave(&mut self.terminal);
        }
    }
}

fn leave(terminal: &mut Tty) -> anyhow::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// the panic message would otherwise be printed into the alternate screen and lost
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            previous(info);
        }));
    });
}
