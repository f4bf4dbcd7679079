use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::images::handler;
use crate::features::images::service::ImageService;

pub fn routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route("/images", get(handler::list_images))
        .with_state(service)
}
