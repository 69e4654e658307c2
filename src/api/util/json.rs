use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::DashboardError;

/// Wrap a service result in the response envelope; errors render through
/// [`DashboardError`]'s own response mapping.
pub fn to_json<T: serde::Serialize>(
    result: Result<T, DashboardError>,
) -> Result<Json<ApiResponse<T>>, DashboardError> {
    result.map(|value| Json(ApiResponse::ok(value)))
}
