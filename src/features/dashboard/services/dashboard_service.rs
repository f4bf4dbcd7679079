use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{DashboardStatsDto, RecentOrderDto, TopProductDto};
use crate::shared::constants::DASHBOARD_LIST_LIMIT;

/// Order status excluded from revenue
const CANCELLED: &str = "CANCELLED";

pub struct DashboardService {
    pool: PgPool,
    low_stock_threshold: i32,
}

impl DashboardService {
    pub fn new(pool: PgPool, low_stock_threshold: i32) -> Self {
        Self {
            pool,
            low_stock_threshold,
        }
    }

    pub async fn get_stats(&self) -> Result<DashboardStatsDto> {
        let (total_products, total_orders, total_users, total_revenue, low_stock_products): (
            i64,
            i64,
            i64,
            Decimal,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products),
                (SELECT COUNT(*) FROM orders),
                (SELECT COUNT(*) FROM users),
                (SELECT COALESCE(SUM(total), 0) FROM orders WHERE status <> $1),
                (SELECT COUNT(*) FROM products WHERE quantity <= $2)
            "#,
        )
        .bind(CANCELLED)
        .bind(self.low_stock_threshold)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard counts: {:?}", e);
            AppError::Database(e)
        })?;

        let recent_orders: Vec<RecentOrderDto> = sqlx::query_as(
            r#"
            SELECT id, order_number, total, status, created_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(DASHBOARD_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get recent orders: {:?}", e);
            AppError::Database(e)
        })?;

        let top_products: Vec<TopProductDto> = sqlx::query_as(
            r#"
            SELECT p.id, p.name, p.slug, p.price,
                   COALESCE(SUM(oi.quantity), 0)::BIGINT AS units_sold
            FROM products p
            LEFT JOIN order_items oi ON oi.product_id = p.id
            GROUP BY p.id
            ORDER BY units_sold DESC, p.name
            LIMIT $1
            "#,
        )
        .bind(DASHBOARD_LIST_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get top products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardStatsDto {
            total_products,
            total_orders,
            total_users,
            total_revenue,
            low_stock_products,
            recent_orders,
            top_products,
        })
    }
}
