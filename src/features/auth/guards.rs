//! Authorization checks shared by every admin route.
//!
//! The admin area has exactly one gate: a request must carry a verified
//! session and that session must hold the admin permission flag. Handlers
//! behind the gate never repeat the check; they only read the session from
//! request extensions when they need it.

use axum::http::{header, HeaderMap};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

/// Admit only sessions carrying the admin permission flag
pub fn authorize_admin(user: AuthenticatedUser) -> Result<AuthenticatedUser, AppError> {
    if !user.is_admin() {
        tracing::warn!(sub = %user.sub, "Admin access denied");
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(user)
}
