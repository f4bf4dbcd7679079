use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::images::dto::ImageListResponse;
use crate::features::images::service::ImageService;
use crate::shared::types::ErrorResponse;

/// Every image under the public directory
#[utoipa::path(
    get,
    path = "/api/admin/images",
    responses(
        (status = 200, description = "Sorted site-root image paths", body = ImageListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "images",
    security(("bearer_auth" = []))
)]
pub async fn list_images(
    State(service): State<Arc<ImageService>>,
) -> Result<Json<ImageListResponse>> {
    let images = service.list().await?;
    Ok(Json(ImageListResponse { images }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::images::routes::routes;
    use crate::shared::test_helpers::{gated_admin_router, ADMIN_TOKEN};
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_list_images_wraps_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("products/towels")).unwrap();
        std::fs::write(dir.path().join("products/towels/pic4.png"), b"").unwrap();

        let service = Arc::new(ImageService::new(dir.path()));
        let server = TestServer::new(gated_admin_router(routes(service))).unwrap();

        let response = server
            .get("/api/admin/images")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", ADMIN_TOKEN)).unwrap(),
            )
            .await;

        response.assert_status(StatusCode::OK);
        let body: ImageListResponse = response.json();
        assert_eq!(body.images, vec!["/products/towels/pic4.png"]);
    }

    #[tokio::test]
    async fn test_list_images_requires_session() {
        let service = Arc::new(ImageService::new("does-not-exist"));
        let server = TestServer::new(gated_admin_router(routes(service))).unwrap();

        server
            .get("/api/admin/images")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
