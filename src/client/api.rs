use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::error::ClientError;
use crate::features::categories::dtos::{
    CategoryDto, CategoryListResponse, CategoryPayload, CategoryResponse,
};
use crate::features::images::dto::ImageListResponse;

/// The admin endpoints the page controllers depend on
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryDto>, ClientError>;

    async fn get_category(&self, id: Uuid) -> Result<CategoryDto, ClientError>;

    async fn create_category(&self, payload: &CategoryPayload) -> Result<CategoryDto, ClientError>;

    async fn update_category(
        &self,
        id: Uuid,
        payload: &CategoryPayload,
    ) -> Result<CategoryDto, ClientError>;

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError>;

    async fn list_images(&self) -> Result<Vec<String>, ClientError>;
}

/// [`AdminApi`] over HTTP with a bearer session token
pub struct HttpAdminClient {
    base_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl HttpAdminClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/admin{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.bearer_auth(&self.token).send().await.map_err(|e| {
            tracing::error!("Admin API request failed: {}", e);
            ClientError::from(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Admin API error: HTTP {} - {}", status, body);
            return Err(ClientError::from_response(status, &body));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse admin API response: {}", e);
            ClientError::Transport(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl AdminApi for HttpAdminClient {
    async fn list_categories(&self) -> Result<Vec<CategoryDto>, ClientError> {
        let body: CategoryListResponse = self
            .send_json(self.http_client.get(self.url("/categories")))
            .await?;
        Ok(body.categories)
    }

    async fn get_category(&self, id: Uuid) -> Result<CategoryDto, ClientError> {
        let body: CategoryResponse = self
            .send_json(self.http_client.get(self.url(&format!("/categories/{}", id))))
            .await?;
        Ok(body.category)
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<CategoryDto, ClientError> {
        let body: CategoryResponse = self
            .send_json(self.http_client.post(self.url("/categories")).json(payload))
            .await?;
        Ok(body.category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        payload: &CategoryPayload,
    ) -> Result<CategoryDto, ClientError> {
        let body: CategoryResponse = self
            .send_json(
                self.http_client
                    .put(self.url(&format!("/categories/{}", id)))
                    .json(payload),
            )
            .await?;
        Ok(body.category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ClientError> {
        self.send(self.http_client.delete(self.url(&format!("/categories/{}", id))))
            .await?;
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<String>, ClientError> {
        let body: ImageListResponse = self
            .send_json(self.http_client.get(self.url("/images")))
            .await?;
        Ok(body.images)
    }
}
