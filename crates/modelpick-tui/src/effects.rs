//! Effects returned by the reducer for the runtime to execute.
//!
//! The reducer never performs I/O; it asks the runtime to.

use modelpick_core::loader::LoadTicket;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Fetch the catalog and report back with `UiEvent::CatalogLoaded`.
    LoadCatalog { ticket: LoadTicket },
    /// Leave the event loop.
    Quit,
}
