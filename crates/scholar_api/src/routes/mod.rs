use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{contribution, health_check, suggestion};
use crate::AppState;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/contributions/{id}", get(contribution::get_contribution))
        .route(
            "/contributions/{id}/requirements",
            get(contribution::get_requirements),
        )
        .route(
            "/contributions/{id}/validation",
            get(contribution::get_validation),
        )
        .route("/contributions/{id}/resubmit", post(contribution::resubmit))
        .route(
            "/contributions/{id}/suggestions/{sid}/respond",
            post(suggestion::respond_to_suggestion),
        )
        .with_state(state)
}
