//! Dashboard controller: connects routes to the dashboard service

use axum::extract::{Path, Query, State};
use axum::Json;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::dashboard::dto::chart_query::ChartQuery;
use crate::domain::dashboard::model::chart::Chart;
use crate::domain::dashboard::model::stack::{ResourceTotals, StackSummary};
use crate::errors::DashboardError;

pub struct DashboardController;

impl DashboardController {
    pub async fn get_charts(
        State(state): State<AppState>,
        Path(organization_id): Path<String>,
        Query(query): Query<ChartQuery>,
    ) -> Result<Json<ApiResponse<Vec<Chart>>>, DashboardError> {
        query.validate()?;
        to_json(
            state
                .dashboard_service
                .get_charts(&organization_id, &query.chart_type, &query.params())
                .await,
        )
    }

    pub async fn get_stacks(
        State(state): State<AppState>,
        Path(organization_id): Path<String>,
    ) -> Result<Json<ApiResponse<Vec<StackSummary>>>, DashboardError> {
        to_json(state.dashboard_service.get_stacks(&organization_id).await)
    }

    pub async fn get_resources(
        State(state): State<AppState>,
        Path(organization_id): Path<String>,
    ) -> Result<Json<ApiResponse<ResourceTotals>>, DashboardError> {
        to_json(state.dashboard_service.get_resources(&organization_id).await)
    }
}
