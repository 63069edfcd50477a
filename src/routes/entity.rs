//! Inventory routes. Handlers resolve the entity from the first path segment
//! (`system_info`, `router_info`), so both record types share one route family.

use crate::handlers::entity::{add_form, add_submit, delete, edit_form, edit_submit, index, list};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/:path_segment", get(list))
        .route("/:path_segment/add", get(add_form).post(add_submit))
        .route("/:path_segment/edit/:id", get(edit_form).post(edit_submit))
        .route("/:path_segment/delete/:id", post(delete))
        .with_state(state)
}
