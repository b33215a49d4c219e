pub mod catalog;
pub mod forms;
pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog                                         packages, treats, time slots, steps
///
/// /forms                                           list, create
/// /forms/{id}                                      get, partial update, delete
/// /forms/{id}/steps                                step status report
/// /forms/{id}/submit                               submit draft (POST)
///
/// /orders/{order_number}                           get order
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/forms", forms::router())
        .nest("/orders", orders::router())
}
