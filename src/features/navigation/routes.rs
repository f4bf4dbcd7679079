use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::core::middleware::optional_session;
use crate::features::auth::TokenVerifier;
use crate::features::navigation::handler;

/// Public route; a valid session is attached when present
pub fn routes(verifier: Arc<dyn TokenVerifier>) -> Router {
    Router::new()
        .route("/api/navigation/resolve", get(handler::resolve_route))
        .route_layer(middleware::from_fn_with_state(verifier, optional_session))
}
