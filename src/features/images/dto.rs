use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "images": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageListResponse {
    pub images: Vec<String>,
}
