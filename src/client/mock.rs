//! In-memory [`AdminApi`] for controller tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::client::api::AdminApi;
use crate::client::error::ClientError;
use crate::features::categories::dtos::{CategoryDto, CategoryPayload, ProductCountDto};

pub fn category(name: &str, parent_id: Option<Uuid>, products: i64) -> CategoryDto {
    CategoryDto {
        id: Uuid::now_v7(),
        name: name.to_string(),
        slug: crate::shared::slug::slugify(name),
        description: None,
        image: None,
        parent_id,
        parent: None,
        children: Vec::new(),
        count: ProductCountDto { products },
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[derive(Default)]
struct State {
    categories: Vec<CategoryDto>,
    images: Vec<String>,
    fail_next: Option<(u16, String)>,
    succeed_before_failure: usize,
    write_calls: usize,
    last_payload: Option<CategoryPayload>,
}

#[derive(Default)]
pub struct MockAdminApi {
    state: Mutex<State>,
}

impl MockAdminApi {
    pub fn with_categories(categories: Vec<CategoryDto>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().categories = categories;
        api
    }

    pub fn with_images(images: &[&str]) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().images = images.iter().map(|s| s.to_string()).collect();
        api
    }

    /// Make the next call fail with this status and `{ "error": message }`
    pub fn fail_next(&self, status: u16, message: &str) {
        self.fail_next_after(0, status, message);
    }

    /// Let `calls` calls succeed, then fail the one after them
    pub fn fail_next_after(&self, calls: usize, status: u16, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.fail_next = Some((status, message.to_string()));
        state.succeed_before_failure = calls;
    }

    pub fn write_calls(&self) -> usize {
        self.state.lock().unwrap().write_calls
    }

    pub fn last_payload(&self) -> Option<CategoryPayload> {
        self.state.lock().unwrap().last_payload.clone()
    }

    pub fn stored_ids(&self) -> Vec<Uuid> {
        self.state.lock().unwrap().categories.iter().map(|c| c.id).collect()
    }

    fn take_failure(state: &mut State) -> Result<(), ClientError> {
        if state.fail_next.is_some() && state.succeed_before_failure > 0 {
            state.succeed_before_failure -= 1;
            return Ok(());
        }
        match state.fail_next.take() {
            Some((status, message)) => {
                let status = reqwest::StatusCode::from_u16(status).unwrap();
                let body = serde_json::json!({ "error": message }).to_string();
                Err(ClientError::from_response(status, &body))
            }
            None => Ok(()),
        }
    }

    fn write(&self, id: Option<Uuid>, payload: &CategoryPayload) -> Result<CategoryDto, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.write_calls += 1;
        state.last_payload = Some(payload.clone());
        Self::take_failure(&mut state)?;

        let mut dto = category(&payload.name, payload.parent_id, 0);
        dto.slug = payload.slug.clone();
        dto.description = payload.description.clone();
        dto.image = payload.image.clone();

        match id {
            Some(id) => {
                dto.id = id;
                let slot = state
                    .categories
                    .iter_mut()
                    .find(|c| c.id == id)
                    .ok_or_else(|| ClientError::NotFound("Category not found".to_string()))?;
                *slot = dto.clone();
            }
            None => state.categories.push(dto.clone()),
        }
        Ok(dto)
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn list_categories(&self) -> Result<Vec<CategoryDto>, ClientError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        Ok(state.categories.clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<CategoryDto, ClientError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        state
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Category not found".to_string()))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<CategoryDto, ClientError> {
        self.write(None, payload)
    }

    async fn update_category(
        &self,
        id: Uuid,
        payload: &CategoryPayload,
    ) -> Result<CategoryDto, ClientError> {
        self.write(Some(id), payload)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.write_calls += 1;
        Self::take_failure(&mut state)?;
        state.categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<String>, ClientError> {
        let mut state = self.state.lock().unwrap();
        Self::take_failure(&mut state)?;
        Ok(state.images.clone())
    }
}
