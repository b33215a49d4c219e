//! Route definitions for the static catalog. Mounted at `/catalog`.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(catalog::get_catalog))
}
