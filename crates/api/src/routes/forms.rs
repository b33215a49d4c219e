//! Route definitions for order forms.
//!
//! Mounted at `/forms` by `api_routes()`.
//!
//! ```text
//! POST   /                              create_form
//! GET    /                              list_forms (?status, limit, offset)
//! GET    /{id}                          get_form
//! PATCH  /{id}                          update_form
//! DELETE /{id}                          delete_form
//! GET    /{id}/steps                    get_steps
//! POST   /{id}/submit                   submit_form
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Order form routes, mounted at `/forms`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list_forms).post(forms::create_form))
        .route(
            "/{id}",
            get(forms::get_form)
                .patch(forms::update_form)
                .delete(forms::delete_form),
        )
        .route("/{id}/steps", get(forms::get_steps))
        .route("/{id}/submit", post(forms::submit_form))
}
