use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::brands::models::Brand;
use crate::features::categories::dtos::ProductCountDto;
use crate::shared::slug::slugify;
use crate::shared::validation::{non_blank, SLUG_REGEX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo: Option<String>,
    #[serde(rename = "_count")]
    pub count: ProductCountDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Brand> for BrandDto {
    fn from(row: Brand) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            logo: row.logo,
            count: ProductCountDto {
                products: row.product_count,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(regex(
        path = *SLUG_REGEX,
        message = "Slug must contain only lowercase letters, digits and single hyphens"
    ))]
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub logo: Option<String>,
}

impl CreateBrandDto {
    /// Trim fields and derive the slug from the name when none was given
    pub fn normalized(self) -> Self {
        let name = self.name.trim().to_string();
        let slug = non_blank(self.slug).or_else(|| Some(slugify(&name)));
        Self {
            name,
            slug,
            logo: non_blank(self.logo),
        }
    }

    pub fn slug(&self) -> &str {
        self.slug.as_deref().unwrap_or_default()
    }
}

/// `{ "brands": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandListResponse {
    pub brands: Vec<BrandDto>,
}

/// `{ "brand": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub brand: BrandDto,
}
