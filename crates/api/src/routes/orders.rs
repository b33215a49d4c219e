//! Route definitions for orders. Mounted at `/orders`.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/{order_number}", get(orders::get_order))
}
