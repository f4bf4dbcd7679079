use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/products", post(handlers::create_product))
        .with_state(service)
}
