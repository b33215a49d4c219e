//! Handlers for order forms.
//!
//! Covers the draft lifecycle (create, read, partial update, delete, list),
//! the step status report that drives the wizard's navigation, and the
//! final submission that turns a draft into an order.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use sugarloaf_core::error::CoreError;
use sugarloaf_core::form::{FormDraft, FormStatus};
use sugarloaf_core::form_steps::{
    completed_steps_count, full_step_index, step_states, visible_step_index, visible_steps,
    StepState, STEPS,
};
use sugarloaf_core::types::DbId;
use sugarloaf_db::codec::{from_storage, to_storage};
use sugarloaf_db::models::order_form::{OrderFormRow, UpdateOrderForm};
use sugarloaf_db::repositories::OrderFormRepo;
use sugarloaf_db::{form_update, submission};

use crate::error::{AppError, AppResult};
use crate::query::{clamp_limit, clamp_offset, ListFormsParams, DEFAULT_LIMIT, MAX_LIMIT};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An order form as returned by the API.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    #[serde(flatten)]
    pub form: FormDraft,
    pub customer_id: Option<DbId>,
}

impl From<&OrderFormRow> for FormResponse {
    fn from(row: &OrderFormRow) -> Self {
        Self {
            form: from_storage(row),
            customer_id: row.customer_id,
        }
    }
}

/// Step-by-step progress for a form, over the steps currently visible.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub steps: Vec<StepState>,
    /// Index of the current step within `steps`.
    pub current_index: usize,
    /// Full-catalog index of the following visible step, for `current_step`
    /// updates. `None` on the last step.
    pub next_step: Option<usize>,
    pub completed_count: usize,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a form row or fail with `NotFound`.
async fn ensure_form_exists(pool: &sqlx::PgPool, id: &str) -> AppResult<OrderFormRow> {
    OrderFormRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "OrderForm",
            id: id.to_string(),
        })
    })
}

// ---------------------------------------------------------------------------
// POST /forms
// ---------------------------------------------------------------------------

/// Start a new, empty order form.
pub async fn create_form(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let form = FormDraft::new(chrono::Utc::now());
    let row = OrderFormRepo::create(&state.pool, &to_storage(&form, None)).await?;

    tracing::info!(form_id = %row.id, "Order form created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FormResponse::from(&row),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /forms
// ---------------------------------------------------------------------------

/// List order forms, most recently updated first.
pub async fn list_forms(
    State(state): State<AppState>,
    Query(params): Query<ListFormsParams>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .map(FormStatus::from_str_db)
        .transpose()?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let rows =
        OrderFormRepo::list(&state.pool, status.map(|s| s.as_str()), limit, offset).await?;

    tracing::debug!(count = rows.len(), ?status, "Listed order forms");

    let items: Vec<FormResponse> = rows.iter().map(FormResponse::from).collect();
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /forms/{id}
// ---------------------------------------------------------------------------

pub async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_form_exists(&state.pool, &id).await?;
    Ok(Json(DataResponse {
        data: FormResponse::from(&row),
    }))
}

// ---------------------------------------------------------------------------
// PATCH /forms/{id}
// ---------------------------------------------------------------------------

/// Apply a partial update to a draft.
///
/// Links the customer once the lead step has data. Submitted forms are
/// read-only.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderForm>,
) -> AppResult<impl IntoResponse> {
    let updated = form_update::update_form(&state.pool, &id, &body).await?;
    Ok(Json(DataResponse {
        data: FormResponse::from(&updated),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /forms/{id}
// ---------------------------------------------------------------------------

/// Delete a draft. Submitted forms are kept as the record behind their order.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    form_update::delete_form(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /forms/{id}/steps
// ---------------------------------------------------------------------------

/// Derived completion and accessibility for each visible step.
pub async fn get_steps(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_form_exists(&state.pool, &id).await?;
    let form = from_storage(&row);

    let visible = visible_steps(STEPS, &form);
    // A hidden current step falls back to its full index, clamped into range.
    let current_index = visible_step_index(form.current_step as usize, STEPS, &visible)
        .min(visible.len().saturating_sub(1));

    let next_index = current_index + 1;
    let next_step =
        (next_index < visible.len()).then(|| full_step_index(next_index, &visible, STEPS));

    let report = StepReport {
        steps: step_states(&visible, current_index, &form),
        current_index,
        next_step,
        completed_count: completed_steps_count(&visible, &form),
        total: visible.len(),
    };

    tracing::debug!(
        form_id = %id,
        current_index,
        completed = report.completed_count,
        "Computed step report"
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// POST /forms/{id}/submit
// ---------------------------------------------------------------------------

/// Submit a draft, creating its order and order number.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let today = chrono::Utc::now().date_naive();
    let receipt = submission::submit_form(&state.pool, &id, today).await?;
    Ok(Json(DataResponse { data: receipt }))
}
