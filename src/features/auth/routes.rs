use axum::{routing::get, Router};

use crate::features::auth::handler;

/// Session routes, mounted under the admin gate
pub fn admin_routes() -> Router {
    Router::new().route("/me", get(handler::get_me))
}
