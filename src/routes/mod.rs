//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use crate::store::Gateway;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// The full application: operational routes at the root, resources under `/api`.
pub fn app<G: Gateway>(state: AppState<G>, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes::<G>())
        .nest("/api", api_routes::<G>())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
