//! Catalog loading with fallback and default selection.
//!
//! [`CatalogState`] owns the loaded models, the loading flag and the last
//! error. It never owns the selection: callers pass the current selection in
//! and receive default-selection changes through a callback.
//!
//! Loads are ticketed. [`CatalogState::begin_load`] hands out a
//! [`LoadTicket`] with a monotonically increasing sequence number and only the
//! newest ticket's result is applied, so a slow stale response can never
//! overwrite a fresher one.
//!
//! Failures never escape: on any error the fallback catalog is installed and
//! the error text is kept in `error_message`.

pub mod error;
pub mod source;
pub mod upstream;

pub use error::CatalogError;
pub use source::{CatalogSource, ConfiguredSource, HttpCatalogSource};
pub use upstream::OpenRouterSource;

use crate::catalog::{self, ModelDescriptor, PREFERRED_MODEL_ID};

/// Identifies one in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// What a finished load did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched catalog was installed.
    Loaded { count: usize },
    /// The fetch failed and the fallback catalog was installed.
    FellBack { error: String },
    /// A newer load was started; this result was discarded.
    Superseded,
}

#[derive(Debug)]
pub struct CatalogState {
    models: Vec<ModelDescriptor>,
    loading: bool,
    error_message: Option<String>,
    preferred_id: String,
    next_seq: u64,
    active: Option<LoadTicket>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(PREFERRED_MODEL_ID)
    }
}

impl CatalogState {
    pub fn new(preferred_id: impl Into<String>) -> Self {
        Self {
            models: Vec::new(),
            loading: false,
            error_message: None,
            preferred_id: preferred_id.into(),
            next_seq: 0,
            active: None,
        }
    }

    /// Loaded models, in source order. Empty until the first load finishes.
    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn preferred_id(&self) -> &str {
        &self.preferred_id
    }

    pub fn search_visible(&self) -> bool {
        catalog::search_visible(self.models.len())
    }

    /// Marks a load as in flight and returns its ticket.
    ///
    /// Clears any previous error. Any ticket issued earlier is superseded.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        self.active = Some(ticket);
        self.loading = true;
        self.error_message = None;
        ticket
    }

    /// Applies the result of the load identified by `ticket`.
    ///
    /// A stale ticket is ignored entirely. Otherwise the fetched models (or the
    /// fallback catalog) are installed, `loading` is cleared, and when
    /// `selected` is empty the default selection is reported to `on_select`.
    pub fn finish_load<F>(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ModelDescriptor>, CatalogError>,
        selected: Option<&str>,
        on_select: F,
    ) -> LoadOutcome
    where
        F: FnOnce(&str),
    {
        if self.active != Some(ticket) {
            tracing::debug!(seq = ticket.seq(), "Discarding superseded catalog load");
            return LoadOutcome::Superseded;
        }
        self.active = None;

        let outcome = match result {
            Ok(models) if !models.is_empty() => {
                let count = models.len();
                self.models = models;
                self.error_message = None;
                LoadOutcome::Loaded { count }
            }
            Ok(_) => self.install_fallback(&CatalogError::Empty),
            Err(err) => self.install_fallback(&err),
        };
        self.loading = false;

        if selected.is_none_or(str::is_empty)
            && let Some(id) = default_selection(&self.models, &self.preferred_id)
        {
            tracing::info!(model = id, "Selecting default model");
            on_select(id);
        }

        outcome
    }

    /// Runs one complete load against `source`.
    ///
    /// `loading` is reset even if the returned future is dropped before the
    /// fetch completes.
    pub async fn load<S, F>(
        &mut self,
        source: &S,
        selected: Option<&str>,
        on_select: F,
    ) -> LoadOutcome
    where
        S: CatalogSource,
        F: FnOnce(&str),
    {
        let ticket = self.begin_load();
        let guard = LoadGuard {
            state: self,
            ticket,
            armed: true,
        };
        let result = source.fetch().await;
        guard.finish(result, selected, on_select)
    }

    fn install_fallback(&mut self, err: &CatalogError) -> LoadOutcome {
        tracing::warn!(error = %err, "Model catalog load failed; using fallback catalog");
        let error = err.to_string();
        self.models = catalog::fallback_catalog();
        self.error_message = Some(error.clone());
        LoadOutcome::FellBack { error }
    }

    fn abandon(&mut self, ticket: LoadTicket) {
        if self.active == Some(ticket) {
            self.active = None;
            self.loading = false;
        }
    }
}

/// The id default selection picks: the preferred id if present, else the first entry.
pub fn default_selection<'a>(models: &'a [ModelDescriptor], preferred_id: &str) -> Option<&'a str> {
    models
        .iter()
        .find(|m| m.id == preferred_id)
        .or_else(|| models.first())
        .map(|m| m.id.as_str())
}

struct LoadGuard<'a> {
    state: &'a mut CatalogState,
    ticket: LoadTicket,
    armed: bool,
}

impl LoadGuard<'_> {
    fn finish<F>(
        mut self,
        result: Result<Vec<ModelDescriptor>, CatalogError>,
        selected: Option<&str>,
        on_select: F,
    ) -> LoadOutcome
    where
        F: FnOnce(&str),
    {
        self.armed = false;
        self.state
            .finish_load(self.ticket, result, selected, on_select)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.abandon(self.ticket);
        }
    }
}
