//! Terminal lifecycle for the picker.
//!
//! The terminal is restored on normal exit (runtime `Drop`) and on panic.
//! Ctrl+C arrives as a key event in raw mode and is handled by the picker.
//! The picker draws on stderr so stdout stays free for the chosen id.

use std::io::{self, Stderr};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type PickerTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Enables raw mode, enters the alternate screen and hides the cursor.
///
/// Call `install_panic_hook()` first so a panic cannot leave the terminal raw.
pub fn setup_terminal() -> Result<PickerTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")
}

/// Restores terminal state. Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    let _ = execute!(io::stderr(), Show);
    execute!(io::stderr(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
