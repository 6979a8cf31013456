//! Model picker state and key handling.
//!
//! The picker is the consumer of the catalog loader: it owns the selected id
//! and receives default selections through the loader's callback.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use modelpick_core::catalog::{ModelDescriptor, PREFERRED_MODEL_ID, SearchState};
use modelpick_core::loader::{CatalogError, CatalogState, LoadOutcome, LoadTicket};

use crate::effects::UiEffect;

/// How the picker was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerExit {
    Selected(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PickerOptions {
    /// Id default selection looks for first.
    pub preferred_model: String,
    /// The consumer's current selection, highlighted on open.
    pub selected: Option<String>,
    /// Show the catalog but refuse to select.
    pub disabled: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            preferred_model: PREFERRED_MODEL_ID.to_string(),
            selected: None,
            disabled: false,
        }
    }
}

#[derive(Debug)]
pub struct PickerState {
    catalog: CatalogState,
    search: SearchState,
    highlighted: usize,
    selected: Option<String>,
    disabled: bool,
    show_details: bool,
    notice: Option<String>,
    exit: Option<PickerExit>,
    pub spinner_frame: usize,
}

impl PickerState {
    /// Creates the picker and starts the initial catalog load.
    pub fn open(options: PickerOptions) -> (Self, Vec<UiEffect>) {
        let mut state = Self {
            catalog: CatalogState::new(options.preferred_model),
            search: SearchState::default(),
            highlighted: 0,
            selected: options.selected.filter(|id| !id.is_empty()),
            disabled: options.disabled,
            show_details: false,
            notice: None,
            exit: None,
            spinner_frame: 0,
        };
        let ticket = state.catalog.begin_load();
        (state, vec![UiEffect::LoadCatalog { ticket }])
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn exit(&self) -> Option<&PickerExit> {
        self.exit.as_ref()
    }

    /// Models currently listed.
    ///
    /// Small catalogs have no search box, so the query never narrows them.
    pub fn visible(&self) -> Vec<&ModelDescriptor> {
        let models = self.catalog.models();
        if self.catalog.search_visible() {
            self.search.visible(models)
        } else {
            models.iter().collect()
        }
    }

    pub fn highlighted_model(&self) -> Option<&ModelDescriptor> {
        self.visible().get(self.highlighted).copied()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => return self.cancel(),
            KeyCode::Char('r') if ctrl => return self.retry(),
            KeyCode::Char('u') if ctrl => {
                self.search.clear();
                self.on_query_changed();
            }
            KeyCode::Esc => {
                if self.search.query().is_empty() {
                    return self.cancel();
                }
                self.search.clear();
                self.on_query_changed();
            }
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = self.visible().len();
                if self.highlighted + 1 < count {
                    self.highlighted += 1;
                }
            }
            KeyCode::Tab => self.show_details = !self.show_details,
            KeyCode::Enter => return self.select_highlighted(),
            KeyCode::Backspace => {
                if alt {
                    self.search.clear_word_left();
                } else {
                    self.search.pop_char();
                }
                self.on_query_changed();
            }
            KeyCode::Char(c) if !ctrl && !alt && self.catalog.search_visible() => {
                self.search.push_char(c);
                self.on_query_changed();
            }
            _ => {}
        }

        Vec::new()
    }

    /// Applies a finished fetch. Superseded results change nothing.
    pub fn on_catalog_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ModelDescriptor>, CatalogError>,
    ) -> LoadOutcome {
        let current = self.selected.clone();
        let mut defaulted = None;
        let outcome =
            self.catalog
                .finish_load(ticket, result, current.as_deref(), |id| {
                    defaulted = Some(id.to_string());
                });
        if outcome == LoadOutcome::Superseded {
            return outcome;
        }

        if defaulted.is_some() {
            self.selected = defaulted;
        }
        if !self.catalog.search_visible() {
            self.search.clear();
        }
        self.highlight_selected();
        outcome
    }

    fn select_highlighted(&mut self) -> Vec<UiEffect> {
        let Some(id) = self.highlighted_model().map(|m| m.id.clone()) else {
            return Vec::new();
        };

        if self.disabled {
            self.notice = Some("Model selection is disabled".to_string());
            return Vec::new();
        }

        tracing::info!(model = %id, "Model selected");
        self.selected = Some(id.clone());
        self.exit = Some(PickerExit::Selected(id));
        vec![UiEffect::Quit]
    }

    fn retry(&mut self) -> Vec<UiEffect> {
        self.notice = None;
        let ticket = self.catalog.begin_load();
        tracing::debug!(seq = ticket.seq(), "Reloading model catalog");
        vec![UiEffect::LoadCatalog { ticket }]
    }

    fn cancel(&mut self) -> Vec<UiEffect> {
        self.exit = Some(PickerExit::Cancelled);
        vec![UiEffect::Quit]
    }

    fn on_query_changed(&mut self) {
        self.notice = None;
        self.clamp_highlight();
    }

    fn highlight_selected(&mut self) {
        let position = self
            .selected
            .as_deref()
            .and_then(|id| self.visible().iter().position(|m| m.id == id));
        self.highlighted = position.unwrap_or(0);
    }

    fn clamp_highlight(&mut self) {
        let count = self.visible().len();
        if count == 0 {
            self.highlighted = 0;
        } else if self.highlighted >= count {
            self.highlighted = count - 1;
        }
    }
}
