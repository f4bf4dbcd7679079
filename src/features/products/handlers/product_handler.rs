use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::products::dtos::{CreateProductDto, ProductResponse};
use crate::features::products::services::ProductService;
use crate::shared::types::ErrorResponse;

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error or unknown category/brand", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    ),
    tag = "products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::products::routes::routes;
    use crate::shared::test_helpers::{gated_admin_router, unreachable_pool, ADMIN_TOKEN};
    use axum::http::{header, HeaderValue};
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_product_validates_before_store() {
        let service = Arc::new(ProductService::new(unreachable_pool()));
        let server = TestServer::new(gated_admin_router(routes(service))).unwrap();

        let response = server
            .post("/api/admin/products")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", ADMIN_TOKEN)).unwrap(),
            )
            .json(&json!({ "name": "Towel", "price": "-2.50" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("Price must not be negative"));
    }

    #[tokio::test]
    async fn test_create_product_requires_session() {
        let service = Arc::new(ProductService::new(unreachable_pool()));
        let server = TestServer::new(gated_admin_router(routes(service))).unwrap();

        server
            .post("/api/admin/products")
            .json(&json!({ "name": "Towel", "price": "2.50" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
