//! Handler for the read-only catalog.

use axum::Json;
use serde::Serialize;

use sugarloaf_core::catalog::{PackageOption, TreatOption, PACKAGES, TIME_SLOTS, TREATS};
use sugarloaf_core::form_steps::{StepDefinition, STEPS};

use crate::response::DataResponse;

/// Everything the order form needs to render its choices.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub packages: &'static [PackageOption],
    pub treats: &'static [TreatOption],
    pub time_slots: &'static [&'static str],
    pub steps: &'static [StepDefinition],
}

// ---------------------------------------------------------------------------
// GET /catalog
// ---------------------------------------------------------------------------

pub async fn get_catalog() -> Json<DataResponse<CatalogResponse>> {
    Json(DataResponse {
        data: CatalogResponse {
            packages: PACKAGES,
            treats: TREATS,
            time_slots: TIME_SLOTS,
            steps: STEPS,
        },
    })
}
