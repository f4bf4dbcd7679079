use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardResponse;
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ErrorResponse;

/// Totals, revenue, low stock count, recent orders and best sellers
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<DashboardResponse>> {
    let stats = service.get_stats().await?;
    Ok(Json(DashboardResponse { stats }))
}
