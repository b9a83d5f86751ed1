use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scholar_service::ReconciliationController;

use crate::handlers::map_reconcile_error;
use crate::AppState;

#[derive(Deserialize)]
pub struct RespondRequest {
    pub accept: bool,
}

#[derive(Serialize)]
pub struct RespondResponse {
    pub suggestion: Uuid,
    pub accepted: bool,
    pub can_resubmit: bool,
}

pub async fn respond_to_suggestion(
    State(state): State<AppState>,
    Path((contribution_id, suggestion_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, (StatusCode, String)> {
    let mut controller = ReconciliationController::load(state.store, contribution_id)
        .await
        .map_err(map_reconcile_error)?;

    let result = if body.accept {
        controller.accept(suggestion_id).await
    } else {
        controller.reject(suggestion_id).await
    };
    result.map_err(map_reconcile_error)?;

    Ok(Json(RespondResponse {
        suggestion: suggestion_id,
        accepted: body.accept,
        can_resubmit: controller.can_resubmit(),
    }))
}
