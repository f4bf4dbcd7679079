use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{handle_db_error, AppError, Result};
use crate::features::categories::dtos::{
    CategoryChildDto, CategoryDto, CategoryPayload, CategoryRefDto, ProductCountDto,
};
use crate::features::categories::hierarchy::{
    check_parent_assignment, DeleteGate, ParentRejection,
};
use crate::features::categories::models::Category;

const SELECT_CATEGORY: &str = r#"
    SELECT c.id, c.parent_id, c.name, c.slug, c.description, c.image,
           (SELECT COUNT(*) FROM products p WHERE p.category_id = c.id) AS product_count,
           c.created_at, c.updated_at
    FROM categories c
"#;

const DUPLICATE_SLUG: &str = "A category with this slug already exists";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories with parent, children and product counts, ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryDto>> {
        let sql = format!("{SELECT_CATEGORY} ORDER BY c.name");
        let rows: Vec<Category> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(CategoryDto::assemble(rows))
    }

    /// One category with its parent reference and direct children
    pub async fn get(&self, id: Uuid) -> Result<CategoryDto> {
        let row = fetch_category(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let parent = match row.parent_id {
            Some(parent_id) => fetch_category(&self.pool, parent_id)
                .await?
                .map(|p| CategoryRefDto {
                    id: p.id,
                    name: p.name,
                    slug: p.slug,
                }),
            None => None,
        };

        let sql = format!("{SELECT_CATEGORY} WHERE c.parent_id = $1 ORDER BY c.name");
        let children: Vec<Category> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load subcategories of {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        let children = children
            .into_iter()
            .map(|c| CategoryChildDto {
                id: c.id,
                name: c.name,
                slug: c.slug,
                count: ProductCountDto {
                    products: c.product_count,
                },
            })
            .collect();

        Ok(CategoryDto::from_row(row, parent, children))
    }

    pub async fn create(&self, payload: CategoryPayload) -> Result<CategoryDto> {
        let mut tx = self.pool.begin().await?;

        if let Some(parent_id) = payload.parent_id {
            check_parent(&mut tx, None, parent_id).await?;
        }

        let id = Uuid::now_v7();
        sqlx::query(
            r#"
            INSERT INTO categories (id, parent_id, name, slug, description, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(payload.parent_id)
        .bind(&payload.name)
        .bind(&payload.slug)
        .bind(&payload.description)
        .bind(&payload.image)
        .execute(&mut *tx)
        .await
        .map_err(|e| handle_db_error(e, DUPLICATE_SLUG))?;

        tx.commit().await?;
        tracing::info!(category_id = %id, slug = %payload.slug, "Category created");

        self.get(id).await
    }

    /// Full replace of every editable field
    pub async fn update(&self, id: Uuid, payload: CategoryPayload) -> Result<CategoryDto> {
        let mut tx = self.pool.begin().await?;
        lock_category(&mut tx, id).await?;

        if let Some(parent_id) = payload.parent_id {
            check_parent(&mut tx, Some(id), parent_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE categories
            SET parent_id = $2,
                name = $3,
                slug = $4,
                description = $5,
                image = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(payload.parent_id)
        .bind(&payload.name)
        .bind(&payload.slug)
        .bind(&payload.description)
        .bind(&payload.image)
        .execute(&mut *tx)
        .await
        .map_err(|e| handle_db_error(e, DUPLICATE_SLUG))?;

        tx.commit().await?;
        tracing::info!(category_id = %id, "Category updated");

        self.get(id).await
    }

    /// Delete a category that has no products and no subcategories.
    ///
    /// The row is locked first, so a concurrent insert referencing it waits
    /// until the check and the delete are done.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        lock_category(&mut tx, id).await?;

        let (product_count, child_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products WHERE category_id = $1),
                (SELECT COUNT(*) FROM categories WHERE parent_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if let Err(refusal) = delete_refusal(product_count, child_count) {
            tracing::info!(category_id = %id, product_count, child_count, "Category delete refused");
            return Err(refusal);
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| match handle_db_error(e, DUPLICATE_SLUG) {
                AppError::BadRequest(_) => AppError::Conflict(
                    "Category is still referenced and cannot be deleted".to_string(),
                ),
                other => other,
            })?;

        tx.commit().await?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

async fn fetch_category<'e, E: PgExecutor<'e>>(executor: E, id: Uuid) -> Result<Option<Category>> {
    let sql = format!("{SELECT_CATEGORY} WHERE c.id = $1");
    let category = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

    Ok(category)
}

async fn lock_category(tx: &mut Transaction<'_, Postgres>, id: Uuid) -> Result<()> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM categories WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

    match locked {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound(format!("Category {} not found", id))),
    }
}

/// Keep the hierarchy two levels deep and acyclic.
///
/// `editing` is the category being updated, `None` on create.
async fn check_parent(
    tx: &mut Transaction<'_, Postgres>,
    editing: Option<Uuid>,
    parent_id: Uuid,
) -> Result<()> {
    let parent_of_parent: Option<Option<Uuid>> =
        sqlx::query_scalar("SELECT parent_id FROM categories WHERE id = $1 FOR SHARE")
            .bind(parent_id)
            .fetch_optional(&mut **tx)
            .await?;

    let editing_children: i64 = match editing {
        Some(id) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE parent_id = $1")
                .bind(id)
                .fetch_one(&mut **tx)
                .await?
        }
        None => 0,
    };

    check_parent_assignment(editing, parent_id, parent_of_parent, editing_children)
        .map_err(parent_error)
}

fn parent_error(rejection: ParentRejection) -> AppError {
    let message = rejection.message().to_string();
    match rejection {
        ParentRejection::OwnParent | ParentRejection::ParentNotRoot => {
            AppError::Validation(message)
        }
        ParentRejection::ParentMissing => AppError::BadRequest(message),
        ParentRejection::HasSubcategories => AppError::Conflict(message),
    }
}

/// Conflict carrying every blocking reason, or `Ok` when the delete may go ahead
fn delete_refusal(product_count: i64, child_count: i64) -> Result<()> {
    match DeleteGate::evaluate(product_count, child_count.max(0) as usize).message() {
        Some(message) => Err(AppError::Conflict(message)),
        None => Ok(()),
    }
}
