use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::brands::dtos::{BrandListResponse, BrandResponse, CreateBrandDto};
use crate::features::brands::services::BrandService;
use crate::shared::types::ErrorResponse;

#[utoipa::path(
    get,
    path = "/api/admin/brands",
    responses(
        (status = 200, description = "All brands", body = BrandListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn list_brands(
    State(service): State<Arc<BrandService>>,
) -> Result<Json<BrandListResponse>> {
    let brands = service.list().await?;
    Ok(Json(BrandListResponse { brands }))
}

#[utoipa::path(
    post,
    path = "/api/admin/brands",
    request_body = CreateBrandDto,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 409, description = "Slug already taken", body = ErrorResponse)
    ),
    tag = "brands",
    security(("bearer_auth" = []))
)]
pub async fn create_brand(
    State(service): State<Arc<BrandService>>,
    AppJson(dto): AppJson<CreateBrandDto>,
) -> Result<(StatusCode, Json<BrandResponse>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let brand = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(BrandResponse { brand })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::brands::routes::routes;
    use crate::shared::test_helpers::{gated_admin_router, unreachable_pool, CUSTOMER_TOKEN};
    use axum::http::{header, HeaderValue};
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> TestServer {
        let service = Arc::new(BrandService::new(unreachable_pool()));
        TestServer::new(gated_admin_router(routes(service))).unwrap()
    }

    #[tokio::test]
    async fn test_create_brand_rejects_empty_name() {
        let response = server()
            .post("/api/admin/brands")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer admin-token"))
            .json(&json!({ "name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_brands_forbidden_for_customers() {
        let response = server()
            .get("/api/admin/brands")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", CUSTOMER_TOKEN)).unwrap(),
            )
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }
}
