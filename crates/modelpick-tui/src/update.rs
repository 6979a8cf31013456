//! Picker reducer.
//!
//! The runtime calls `update(state, event)` and executes the returned effects.

use crossterm::event::{Event, KeyEventKind};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::picker::PickerState;

pub fn update(state: &mut PickerState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            Vec::new()
        }
        UiEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            state.handle_key(key)
        }
        UiEvent::Terminal(_) => Vec::new(),
        UiEvent::CatalogLoaded { ticket, result } => {
            let outcome = state.on_catalog_loaded(ticket, result);
            tracing::debug!(seq = ticket.seq(), ?outcome, "Catalog load finished");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use modelpick_core::catalog::ModelDescriptor;

    use super::*;
    use crate::picker::{PickerExit, PickerOptions};

    #[test]
    fn test_key_release_is_ignored() {
        let (mut state, _) = PickerState::open(PickerOptions::default());
        let release = KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert!(update(&mut state, UiEvent::Terminal(Event::Key(release))).is_empty());
        assert_eq!(state.exit(), None);

        let press = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(
            update(&mut state, UiEvent::Terminal(Event::Key(press))),
            vec![UiEffect::Quit]
        );
        assert_eq!(state.exit(), Some(&PickerExit::Cancelled));
    }

    #[test]
    fn test_catalog_loaded_event_installs_models() {
        let (mut state, effects) = PickerState::open(PickerOptions::default());
        let [UiEffect::LoadCatalog { ticket }] = effects.as_slice() else {
            panic!("expected one load effect");
        };

        update(
            &mut state,
            UiEvent::CatalogLoaded {
                ticket: *ticket,
                result: Ok(vec![ModelDescriptor::new("openai/gpt-4o", "GPT-4o")]),
            },
        );

        assert_eq!(state.visible().len(), 1);
        assert_eq!(state.selected(), Some("openai/gpt-4o"));
    }

    #[test]
    fn test_tick_advances_spinner() {
        let (mut state, _) = PickerState::open(PickerOptions::default());
        update(&mut state, UiEvent::Tick);
        update(&mut state, UiEvent::Tick);
        assert_eq!(state.spinner_frame, 2);
    }
}
