use axum::Json;

use crate::features::auth::dto::MeResponseDto;
use crate::features::auth::model::AuthenticatedUser;

/// Current admin session
#[utoipa::path(
    get,
    path = "/api/admin/me",
    responses(
        (status = 200, description = "Current admin session", body = MeResponseDto),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin access required")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Json<MeResponseDto> {
    Json(user.into())
}
