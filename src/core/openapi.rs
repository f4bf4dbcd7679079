use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::brands::{dtos as brands_dtos, handlers as brands_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::images::{dto as images_dto, handler as images_handler};
use crate::features::navigation::{handler as navigation_handler, layout as navigation_layout};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session
        auth::handler::get_me,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Images
        images_handler::list_images,
        // Brands
        brands_handlers::list_brands,
        brands_handlers::create_brand,
        // Products
        products_handlers::create_product,
        // Dashboard
        dashboard_handlers::get_stats,
        // Navigation (public)
        navigation_handler::resolve_route,
    ),
    components(
        schemas(
            ErrorResponse,
            auth::dto::MeResponseDto,
            categories_dtos::CategoryDto,
            categories_dtos::CategoryRefDto,
            categories_dtos::CategoryChildDto,
            categories_dtos::ProductCountDto,
            categories_dtos::CategoryPayload,
            categories_dtos::CategoryListResponse,
            categories_dtos::CategoryResponse,
            images_dto::ImageListResponse,
            brands_dtos::BrandDto,
            brands_dtos::CreateBrandDto,
            brands_dtos::BrandListResponse,
            brands_dtos::BrandResponse,
            products_dtos::ProductDto,
            products_dtos::CreateProductDto,
            products_dtos::ProductResponse,
            dashboard_dtos::DashboardStatsDto,
            dashboard_dtos::RecentOrderDto,
            dashboard_dtos::TopProductDto,
            dashboard_dtos::DashboardResponse,
            navigation_layout::Decision,
            navigation_layout::Chrome,
            navigation_layout::NavItem,
        )
    ),
    tags(
        (name = "auth", description = "Current admin session"),
        (name = "categories", description = "Category hierarchy management (admin only)"),
        (name = "images", description = "Image catalog from the public directory (admin only)"),
        (name = "brands", description = "Brands (admin only)"),
        (name = "products", description = "Product creation (admin only)"),
        (name = "dashboard", description = "Back-office statistics (admin only)"),
        (name = "navigation", description = "Page chrome and redirects by route (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Storefront Admin API",
        version = "0.1.0",
        description = "Back-office API for the storefront",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the title, version and description from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_admin_path_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/admin/categories",
            "/api/admin/categories/{id}",
            "/api/admin/images",
            "/api/admin/brands",
            "/api/admin/products",
            "/api/admin/dashboard",
            "/api/admin/me",
            "/api/navigation/resolve",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_info_override() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Shop".to_string(),
            version: "9.9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);
        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
