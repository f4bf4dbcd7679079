use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::brands::handlers;
use crate::features::brands::services::BrandService;

pub fn routes(service: Arc<BrandService>) -> Router {
    Router::new()
        .route(
            "/brands",
            get(handlers::list_brands).post(handlers::create_brand),
        )
        .with_state(service)
}
