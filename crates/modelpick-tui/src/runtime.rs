//! Picker runtime: owns the terminal, runs the event loop, executes effects.
//!
//! Catalog fetches run on tokio tasks and report back through an inbox
//! channel, so every state change happens on the event-loop thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use modelpick_core::loader::{CatalogSource, ConfiguredSource, LoadTicket};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::picker::{PickerExit, PickerOptions, PickerState};
use crate::terminal::{self, PickerTerminal};
use crate::{render, update};

/// Tick cadence while a load is in flight (spinner animation).
const FAST_TICK: Duration = Duration::from_millis(80);

/// Poll duration when idle.
const IDLE_TICK: Duration = Duration::from_millis(250);

pub struct PickerRuntime {
    terminal: PickerTerminal,
    state: PickerState,
    source: Arc<ConfiguredSource>,
    handle: Handle,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    pending: Vec<UiEffect>,
    should_quit: bool,
    last_tick: Instant,
}

impl PickerRuntime {
    /// Enters the alternate screen. Must be called from within a tokio runtime.
    pub fn new(source: ConfiguredSource, options: PickerOptions) -> Result<Self> {
        let handle = Handle::try_current().context("The picker needs a tokio runtime")?;

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (state, pending) = PickerState::open(options);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            source: Arc::new(source),
            handle,
            inbox_tx,
            inbox_rx,
            pending,
            should_quit: false,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the user selects a model or cancels.
    pub fn run(&mut self) -> Result<Option<String>> {
        let effects = std::mem::take(&mut self.pending);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.should_quit {
            if dirty {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))
                    .context("Failed to draw picker")?;
                dirty = false;
            }

            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }
        }

        Ok(match self.state.exit() {
            Some(PickerExit::Selected(id)) => Some(id.clone()),
            Some(PickerExit::Cancelled) | None => None,
        })
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.catalog().is_loading() {
            FAST_TICK
        } else {
            IDLE_TICK
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::LoadCatalog { ticket } => self.spawn_load(ticket),
                UiEffect::Quit => self.should_quit = true,
            }
        }
    }

    /// Fetches on a tokio task; a superseded result is dropped by the reducer.
    fn spawn_load(&self, ticket: LoadTicket) {
        let tx = self.inbox_tx.clone();
        let source = Arc::clone(&self.source);
        tracing::debug!(seq = ticket.seq(), url = %source.endpoint(), "Spawning catalog fetch");
        self.handle.spawn(async move {
            let result = source.fetch().await;
            let _ = tx.send(UiEvent::CatalogLoaded { ticket, result });
        });
    }
}

impl Drop for PickerRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
