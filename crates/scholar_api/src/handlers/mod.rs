pub mod contribution;
pub mod suggestion;

use axum::http::StatusCode;

use scholar_service::{ReconcileError, StoreError};

pub async fn health_check() -> &'static str {
    "ok"
}

/// One place that decides which HTTP status each engine failure maps to.
pub(crate) fn map_reconcile_error(err: ReconcileError) -> (StatusCode, String) {
    match &err {
        ReconcileError::Persistence(StoreError::NotFound(_))
        | ReconcileError::UnknownSuggestion(_) => (StatusCode::NOT_FOUND, err.to_string()),
        ReconcileError::AlreadyResolved { .. }
        | ReconcileError::Persistence(StoreError::Conflict(_))
        | ReconcileError::ContributionLocked(_) => (StatusCode::CONFLICT, err.to_string()),
        ReconcileError::Validation(_)
        | ReconcileError::SuggestionsPending(_)
        | ReconcileError::ImmutableField(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        ReconcileError::Persistence(StoreError::Backend(_)) => {
            tracing::error!("backend failure: {err}");
            (StatusCode::BAD_GATEWAY, "upstream store unavailable".to_string())
        }
    }
}
