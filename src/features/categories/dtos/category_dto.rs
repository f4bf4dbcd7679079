use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::hierarchy::{CategoryNode, DeleteGate};
use crate::features::categories::models::Category;
use crate::shared::validation::{non_blank, SLUG_REGEX};

/// `_count` object attached to categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCountDto {
    pub products: i64,
}

/// Minimal reference to a parent category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryRefDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Direct child as embedded in its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChildDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(rename = "_count")]
    pub count: ProductCountDto,
}

/// Category as returned by the admin API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub parent: Option<CategoryRefDto>,
    #[serde(default)]
    pub children: Vec<CategoryChildDto>,
    #[serde(rename = "_count", default)]
    pub count: ProductCountDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryDto {
    pub fn product_count(&self) -> i64 {
        self.count.products
    }

    pub fn delete_gate(&self) -> DeleteGate {
        DeleteGate::evaluate(self.count.products, self.children.len())
    }

    /// Build API views from flat rows, resolving parents and children by id
    pub fn assemble(rows: Vec<Category>) -> Vec<CategoryDto> {
        let refs: HashMap<Uuid, CategoryRefDto> = rows
            .iter()
            .map(|c| {
                (
                    c.id,
                    CategoryRefDto {
                        id: c.id,
                        name: c.name.clone(),
                        slug: c.slug.clone(),
                    },
                )
            })
            .collect();

        let mut children: HashMap<Uuid, Vec<CategoryChildDto>> = HashMap::new();
        for row in &rows {
            if let Some(parent_id) = row.parent_id {
                children.entry(parent_id).or_default().push(CategoryChildDto {
                    id: row.id,
                    name: row.name.clone(),
                    slug: row.slug.clone(),
                    count: ProductCountDto {
                        products: row.product_count,
                    },
                });
            }
        }

        rows.into_iter()
            .map(|row| {
                let parent = row.parent_id.and_then(|p| refs.get(&p).cloned());
                let kids = children.remove(&row.id).unwrap_or_default();
                CategoryDto::from_row(row, parent, kids)
            })
            .collect()
    }

    pub fn from_row(
        row: Category,
        parent: Option<CategoryRefDto>,
        children: Vec<CategoryChildDto>,
    ) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            image: row.image,
            parent_id: row.parent_id,
            parent,
            children,
            count: ProductCountDto {
                products: row.product_count,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl CategoryNode for CategoryDto {
    fn id(&self) -> Uuid {
        self.id
    }

    fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }
}

/// Body for create (POST) and full replace (PUT).
///
/// Optional fields are sent as explicit `null` when empty, never as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must contain only lowercase letters, digits and single hyphens"
    ))]
    pub slug: String,

    pub description: Option<String>,

    pub image: Option<String>,

    pub parent_id: Option<Uuid>,
}

impl CategoryPayload {
    /// Trim text fields and turn blank optionals into `None`
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: non_blank(self.description),
            image: non_blank(self.image),
            parent_id: self.parent_id,
        }
    }
}

/// `{ "categories": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryDto>,
}

/// `{ "category": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category: CategoryDto,
}
