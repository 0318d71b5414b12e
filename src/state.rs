//! Shared application state for all routes.

use crate::store::Gateway;

#[derive(Clone)]
pub struct AppState<G> {
    pub gateway: G,
}

impl<G: Gateway> AppState<G> {
    pub fn new(gateway: G) -> Self {
        AppState { gateway }
    }
}
