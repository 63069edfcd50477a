pub mod common;
pub mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::handlers::fallback;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Form posts are a few hundred bytes; anything near this is not a browser form.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: common + inventory routes, 404 fallback, tracing and body limit layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}
