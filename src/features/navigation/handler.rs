use axum::{extract::Query, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::core::extractor::MaybeUser;
use crate::features::navigation::layout::{resolve, Decision};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveQuery {
    /// Page path to resolve, e.g. `/admin/categories`
    pub path: Option<String>,
}

/// Layout decision for a page path and the caller's session
#[utoipa::path(
    get,
    path = "/api/navigation/resolve",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Chrome to render or where to redirect", body = Decision)
    ),
    tag = "navigation"
)]
pub async fn resolve_route(
    MaybeUser(user): MaybeUser,
    Query(query): Query<ResolveQuery>,
) -> Json<Decision> {
    let path = query.path.unwrap_or_else(|| "/".to_string());
    Json(resolve(&path, user.as_ref()))
}

#[cfg(test)]
mod tests {
    use crate::features::navigation::routes::routes;
    use crate::shared::test_helpers::{StaticTokenVerifier, ADMIN_TOKEN};
    use axum::http::{header, HeaderValue};
    use axum_test::TestServer;

    fn server() -> TestServer {
        TestServer::new(routes(StaticTokenVerifier::shared())).unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_admin_visit_redirects_to_sign_in() {
        let response = server()
            .get("/api/navigation/resolve")
            .add_query_param("path", "/admin/products")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["kind"], "redirect");
        assert_eq!(body["location"], "/handler/sign-in?redirect=%2Fadmin%2Fproducts");
    }

    #[tokio::test]
    async fn test_admin_session_gets_admin_chrome() {
        let response = server()
            .get("/api/navigation/resolve")
            .add_query_param("path", "/admin/products")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", ADMIN_TOKEN)).unwrap(),
            )
            .await;

        let body: serde_json::Value = response.json();
        assert_eq!(body["kind"], "render");
        assert_eq!(body["chrome"], "admin");
        assert_eq!(body["menu"][1]["active"], true);
    }

    #[tokio::test]
    async fn test_invalid_token_is_treated_as_anonymous() {
        let response = server()
            .get("/api/navigation/resolve")
            .add_query_param("path", "/")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer bogus"))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["chrome"], "site");
    }
}
