use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrderDto {
    pub id: Uuid,
    pub order_number: String,
    #[schema(value_type = String, example = "120.50")]
    pub total: Decimal,
    /// e.g. `PENDING`, `DELIVERED`, `CANCELLED`
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Best sellers by units ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_users: i64,
    #[schema(value_type = String, example = "10250.00")]
    pub total_revenue: Decimal,
    pub low_stock_products: i64,
    pub recent_orders: Vec<RecentOrderDto>,
    pub top_products: Vec<TopProductDto>,
}

/// `{ "stats": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub stats: DashboardStatsDto,
}
