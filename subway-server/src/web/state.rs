//! Application state for the web layer.

use crate::store::SubwayStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone, Default)]
pub struct AppState {
    /// Stations and lines
    pub store: SubwayStore,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SubwayStore) -> Self {
        Self { store }
    }
}
