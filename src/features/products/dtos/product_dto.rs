use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::Product;
use crate::shared::slug::product_slug;
use crate::shared::validation::{non_blank, PRODUCT_SLUG_REGEX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub quantity: i32,
    pub images: Vec<String>,
    pub thumbnail: Option<String>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub is_active: bool,
    pub is_featured: bool,
    pub sku: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub available_colors: Vec<String>,
    pub available_sizes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            quantity: p.quantity,
            images: p.images,
            thumbnail: p.thumbnail,
            category_id: p.category_id,
            brand_id: p.brand_id,
            is_active: p.is_active,
            is_featured: p.is_featured,
            sku: p.sku,
            color: p.color,
            size: p.size,
            material: p.material,
            available_colors: p.available_colors,
            available_sizes: p.available_sizes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn default_true() -> bool {
    true
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("price").with_message("Price must not be negative".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Derived from the name when empty
    #[serde(default)]
    #[validate(regex(
        path = *PRODUCT_SLUG_REGEX,
        message = "Slug must contain only lowercase letters, digits and hyphens"
    ))]
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    #[schema(value_type = String, example = "19.99")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub category_id: Option<Uuid>,

    #[serde(default)]
    pub brand_id: Option<Uuid>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub is_featured: bool,

    /// Save without publishing
    #[serde(default)]
    pub as_draft: bool,

    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub material: Option<String>,

    #[serde(default)]
    pub available_colors: Vec<String>,

    #[serde(default)]
    pub available_sizes: Vec<String>,
}

impl CreateProductDto {
    /// Trim text, derive a missing slug, drop blank optionals and list entries
    pub fn normalized(self) -> Self {
        let name = self.name.trim().to_string();
        let slug = match self.slug.trim() {
            "" => product_slug(&name),
            manual => manual.to_string(),
        };

        Self {
            name,
            slug,
            description: non_blank(self.description),
            images: clean_list(self.images),
            thumbnail: non_blank(self.thumbnail),
            sku: non_blank(self.sku),
            color: non_blank(self.color),
            size: non_blank(self.size),
            material: non_blank(self.material),
            available_colors: clean_list(self.available_colors),
            available_sizes: clean_list(self.available_sizes),
            ..self
        }
    }

    /// A product without a category is always stored as a draft
    pub fn stored_active(&self) -> bool {
        self.is_active && !self.as_draft && self.category_id.is_some()
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

/// `{ "product": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub product: ProductDto,
}
