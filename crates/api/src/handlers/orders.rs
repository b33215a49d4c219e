//! Handlers for submitted orders.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use sugarloaf_core::error::CoreError;
use sugarloaf_core::order_number::parse_order_number;
use sugarloaf_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /orders/{order_number}
// ---------------------------------------------------------------------------

/// Look up an order by its order number.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    parse_order_number(&order_number)?;

    let order = OrderRepo::find_by_number(&state.pool, &order_number)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_number.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: order }))
}
