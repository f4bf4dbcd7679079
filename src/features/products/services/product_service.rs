use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::products::dtos::{CreateProductDto, ProductDto};
use crate::features::products::models::Product;

const SELECT_PRODUCT: &str = r#"
    SELECT id, category_id, brand_id, name, slug, description, price, quantity,
           images, thumbnail, is_active, is_featured, sku, color, size, material,
           available_colors, available_sizes, created_at, updated_at
    FROM products
"#;

pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a normalized product. The category and brand are share-locked
    /// until commit so neither can be deleted underneath the insert.
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductDto> {
        let mut tx = self.pool.begin().await?;

        if let Some(category_id) = dto.category_id {
            ensure_exists(&mut tx, "categories", category_id, "Category not found").await?;
        }
        if let Some(brand_id) = dto.brand_id {
            ensure_exists(&mut tx, "brands", brand_id, "Brand not found").await?;
        }

        let id = Uuid::now_v7();
        let is_active = dto.stored_active();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, category_id, brand_id, name, slug, description, price, quantity,
                images, thumbnail, is_active, is_featured, sku, color, size, material,
                available_colors, available_sizes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(id)
        .bind(dto.category_id)
        .bind(dto.brand_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(&dto.description)
        .bind(dto.price)
        .bind(dto.quantity)
        .bind(&dto.images)
        .bind(&dto.thumbnail)
        .bind(is_active)
        .bind(dto.is_featured)
        .bind(&dto.sku)
        .bind(&dto.color)
        .bind(&dto.size)
        .bind(&dto.material)
        .bind(&dto.available_colors)
        .bind(&dto.available_sizes)
        .execute(&mut *tx)
        .await
        .map_err(|e| handle_db_error(e, "A product with this slug already exists"))?;

        let sql = format!("{SELECT_PRODUCT} WHERE id = $1");
        let product: Product = sqlx::query_as(&sql).bind(id).fetch_one(&mut *tx).await?;

        tx.commit().await?;
        tracing::info!(
            product_id = %id,
            slug = %product.slug,
            is_active,
            "Product created"
        );

        Ok(product.into())
    }
}

async fn ensure_exists(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    id: Uuid,
    missing: &str,
) -> Result<()> {
    let sql = format!("SELECT id FROM {table} WHERE id = $1 FOR SHARE");
    let found: Option<Uuid> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    match found {
        Some(_) => Ok(()),
        None => Err(AppError::BadRequest(missing.to_string())),
    }
}
