use axum::{routing::get, Router};

use crate::api::controller::dashboard::DashboardController;
use crate::app_state::AppState;

/// Routes nested under `/organizations/{organization_id}/dashboard`.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/charts", get(DashboardController::get_charts))
        .route("/stacks", get(DashboardController::get_stacks))
        .route("/resources", get(DashboardController::get_resources))
}
