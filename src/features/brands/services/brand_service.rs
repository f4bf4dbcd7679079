use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::brands::dtos::{BrandDto, CreateBrandDto};
use crate::features::brands::models::Brand;

const SELECT_BRAND: &str = r#"
    SELECT b.id, b.name, b.slug, b.logo,
           (SELECT COUNT(*) FROM products p WHERE p.brand_id = b.id) AS product_count,
           b.created_at, b.updated_at
    FROM brands b
"#;

pub struct BrandService {
    pool: PgPool,
}

impl BrandService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<BrandDto>> {
        let sql = format!("{SELECT_BRAND} ORDER BY b.name");
        let rows: Vec<Brand> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list brands: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Expects a normalized payload, so the slug is always set
    pub async fn create(&self, dto: CreateBrandDto) -> Result<BrandDto> {
        let id = Uuid::now_v7();
        sqlx::query("INSERT INTO brands (id, name, slug, logo) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&dto.name)
            .bind(dto.slug())
            .bind(&dto.logo)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_db_error(e, "A brand with this slug already exists"))?;

        tracing::info!(brand_id = %id, slug = %dto.slug(), "Brand created");

        let sql = format!("{SELECT_BRAND} WHERE b.id = $1");
        let row: Brand = sqlx::query_as(&sql).bind(id).fetch_one(&self.pool).await?;
        Ok(row.into())
    }
}
