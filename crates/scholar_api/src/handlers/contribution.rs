use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use scholar_core::models::{Contribution, FieldSuggestion};
use scholar_core::rules::{compute_required, RequiredFieldSet, RequirementInput};
use scholar_core::validation::ValidationReport;
use scholar_service::ReconciliationController;

use crate::handlers::map_reconcile_error;
use crate::AppState;

#[derive(Serialize)]
pub struct ContributionView {
    pub contribution: Contribution,
    pub edit_suggestions: Vec<FieldSuggestion>,
}

async fn load_controller(
    state: AppState,
    id: Uuid,
) -> Result<ReconciliationController<scholar_db::PgContributionStore>, (StatusCode, String)> {
    ReconciliationController::load(state.store, id)
        .await
        .map_err(map_reconcile_error)
}

pub async fn get_contribution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContributionView>, (StatusCode, String)> {
    let controller = load_controller(state, id).await?;
    Ok(Json(ContributionView {
        contribution: controller.contribution().clone(),
        edit_suggestions: controller.ledger().all().to_vec(),
    }))
}

pub async fn get_requirements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequiredFieldSet>, (StatusCode, String)> {
    let controller = load_controller(state, id).await?;
    let required = compute_required(&RequirementInput::from_contribution(
        controller.contribution(),
    ));
    Ok(Json(required))
}

pub async fn get_validation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ValidationReport>, (StatusCode, String)> {
    let controller = load_controller(state, id).await?;
    Ok(Json(controller.validate()))
}

#[derive(Serialize)]
pub struct ResubmitResponse {
    pub resubmitted: bool,
}

pub async fn resubmit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResubmitResponse>, (StatusCode, String)> {
    let mut controller = load_controller(state, id).await?;
    controller.resubmit().await.map_err(map_reconcile_error)?;
    Ok(Json(ResubmitResponse { resubmitted: true }))
}
