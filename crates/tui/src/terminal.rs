//! Terminal session management.
//!
//! [`TerminalSession`] puts the terminal into raw mode on the alternate
//! screen with mouse capture (the grid is painted with the mouse, including
//! hover motion), and puts it back when dropped. [`install_panic_hook`]
//! does the same restoration when the application panics.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Failed to initialize the terminal.
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    /// Failed to restore the terminal.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// A specialized Result type for terminal operations.
pub type Result<T> = std::result::Result<T, TerminalError>;

/// The terminal, owned by the application until dropped.
///
/// # Examples
///
/// ```no_run
/// use hourglass_tui::terminal::{TerminalSession, install_panic_hook};
///
/// # fn main() -> hourglass_tui::terminal::Result<()> {
/// install_panic_hook();
/// let mut session = TerminalSession::start()?;
/// session.terminal().clear().ok();
/// session.finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TerminalSession {
    terminal: AppTerminal,
    restored: bool,
}

impl TerminalSession {
    /// Enters raw mode, the alternate screen and mouse capture.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Setup`] if any terminal operation fails. Raw
    /// mode is left again in that case.
    pub fn start() -> Result<Self> {
        enable_raw_mode().map_err(TerminalError::Setup)?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(TerminalError::Setup(e));
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = restore_raw();
                return Err(TerminalError::Setup(e));
            }
        };
        debug!("terminal session started");
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Returns the terminal to draw on.
    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Restores the terminal, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`TerminalError::Restore`] if any terminal operation fails.
    pub fn finish(mut self) -> Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().map_err(TerminalError::Restore)?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .map_err(TerminalError::Restore)?;
        self.terminal.show_cursor().map_err(TerminalError::Restore)?;
        debug!("terminal session restored");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "terminal restore on drop failed");
        }
    }
}

/// Best-effort restoration without a terminal handle.
fn restore_raw() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
}

/// Installs a panic hook that restores the terminal before panicking.
///
/// The hook chains to the hook installed before it, so the panic message is
/// printed on the normal screen. Call it once, before starting a
/// [`TerminalSession`].
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_raw();
        original_hook(panic_info);
    }));
}
