//! Back-office for the storefront: the admin HTTP API and a typed client
//! with the page controllers that drive it.

pub mod client;
pub mod core;
pub mod features;
pub mod shared;

use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;

use crate::core::middleware::admin_gate;
use crate::features::auth::{routes as auth_routes, TokenVerifier};
use crate::features::brands::{routes as brands_routes, BrandService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::images::{routes as images_routes, ImageService};
use crate::features::navigation::routes as navigation_routes;
use crate::features::products::{routes as products_routes, ProductService};

/// Services behind the admin routes
pub struct AdminServices {
    pub categories: Arc<CategoryService>,
    pub brands: Arc<BrandService>,
    pub products: Arc<ProductService>,
    pub images: Arc<ImageService>,
    pub dashboard: Arc<DashboardService>,
}

/// Every `/api/admin/*` route behind the single admin gate, plus the public
/// navigation resolver
pub fn api_router(services: AdminServices, verifier: Arc<dyn TokenVerifier>) -> Router {
    let admin = Router::new()
        .merge(auth_routes::admin_routes())
        .merge(categories_routes::routes(services.categories))
        .merge(brands_routes::routes(services.brands))
        .merge(products_routes::routes(services.products))
        .merge(images_routes::routes(services.images))
        .merge(dashboard_routes::routes(services.dashboard))
        .route_layer(from_fn_with_state(Arc::clone(&verifier), admin_gate));

    Router::new()
        .nest("/api/admin", admin)
        .merge(navigation_routes::routes(verifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{unreachable_pool, StaticTokenVerifier, CUSTOMER_TOKEN};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;

    fn server() -> TestServer {
        let pool = unreachable_pool();
        let services = AdminServices {
            categories: Arc::new(CategoryService::new(pool.clone())),
            brands: Arc::new(BrandService::new(pool.clone())),
            products: Arc::new(ProductService::new(pool.clone())),
            images: Arc::new(ImageService::new("does-not-exist")),
            dashboard: Arc::new(DashboardService::new(pool, 10)),
        };
        TestServer::new(api_router(services, StaticTokenVerifier::shared())).unwrap()
    }

    #[tokio::test]
    async fn test_every_admin_route_is_gated() {
        let server = server();
        for path in [
            "/api/admin/me",
            "/api/admin/categories",
            "/api/admin/brands",
            "/api/admin/images",
            "/api/admin/dashboard",
        ] {
            server.get(path).await.assert_status(StatusCode::UNAUTHORIZED);

            server
                .get(path)
                .add_header(
                    header::AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {}", CUSTOMER_TOKEN)).unwrap(),
                )
                .await
                .assert_status(StatusCode::FORBIDDEN);
        }
    }

    #[tokio::test]
    async fn test_admin_session_endpoint() {
        let response = server()
            .get("/api/admin/me")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer admin-token"))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["sub"], "admin-sub");
        assert_eq!(body["isAdmin"], true);
    }

    #[tokio::test]
    async fn test_navigation_is_public() {
        server()
            .get("/api/navigation/resolve")
            .add_query_param("path", "/shop")
            .await
            .assert_status_ok();
    }
}
