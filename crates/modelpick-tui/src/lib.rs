//! Full-screen model picker for modelpick.
//!
//! Elm-style layout: `picker` holds state and key handling, `update` is the
//! reducer, `render` draws, and `runtime` owns the terminal and runs effects.

pub mod effects;
pub mod events;
pub mod picker;
pub mod render;
pub mod render_utils;
pub mod runtime;
pub mod terminal;
pub mod text;
pub mod update;

use std::io::{IsTerminal, stderr, stdin};

use anyhow::Result;
use modelpick_core::loader::ConfiguredSource;
pub use picker::{PickerExit, PickerOptions, PickerState};
pub use runtime::PickerRuntime;

/// Runs the picker and returns the chosen model id, or `None` if cancelled.
///
/// Must be called from within a tokio runtime.
pub fn run_picker(source: ConfiguredSource, options: PickerOptions) -> Result<Option<String>> {
    if !stdin().is_terminal() || !stderr().is_terminal() {
        anyhow::bail!(
            "The model picker requires a terminal.\n\
             Use `modelpick list` for non-interactive output."
        );
    }

    let mut runtime = PickerRuntime::new(source, options)?;
    runtime.run()
}
