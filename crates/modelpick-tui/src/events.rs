//! Events consumed by the picker reducer.

use crossterm::event::Event;
use modelpick_core::catalog::ModelDescriptor;
use modelpick_core::loader::{CatalogError, LoadTicket};

#[derive(Debug)]
pub enum UiEvent {
    /// Animation tick; drives the loading spinner.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// A spawned catalog fetch finished.
    CatalogLoaded {
        ticket: LoadTicket,
        result: Result<Vec<ModelDescriptor>, CatalogError>,
    },
}
