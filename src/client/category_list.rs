//! Category list page: two-level tree and guarded deletion.

use uuid::Uuid;

use crate::client::api::AdminApi;
use crate::client::error::ClientError;
use crate::features::categories::dtos::CategoryDto;
use crate::features::categories::hierarchy::{group_two_levels, CategoryGroup, DeleteGate};

#[derive(Debug, Default)]
pub struct CategoryListPage {
    categories: Vec<CategoryDto>,
    loaded: bool,
    pending_delete: Option<Uuid>,
    error: Option<String>,
}

impl CategoryListPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every category once
    pub async fn load(&mut self, api: &dyn AdminApi) -> Result<(), ClientError> {
        match api.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                self.loaded = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn categories(&self) -> &[CategoryDto] {
        &self.categories
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn groups(&self) -> Vec<CategoryGroup<'_, CategoryDto>> {
        group_two_levels(&self.categories)
    }

    pub fn delete_gate(&self, id: Uuid) -> Option<DeleteGate> {
        self.find(id).map(CategoryDto::delete_gate)
    }

    pub fn pending_delete(&self) -> Option<&CategoryDto> {
        self.pending_delete.and_then(|id| self.find(id))
    }

    /// Open the confirmation for `id`; blocked categories cannot be confirmed
    pub fn request_delete(&mut self, id: Uuid) -> Result<(), ClientError> {
        let gate = self
            .delete_gate(id)
            .ok_or_else(|| ClientError::NotFound("Category not found".to_string()))?;

        if let Some(message) = gate.message() {
            return Err(ClientError::Validation(message));
        }

        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the DELETE for the pending category.
    ///
    /// Success removes it from the local list right away; failure keeps the
    /// list as it was and records the error.
    pub async fn confirm_delete(&mut self, api: &dyn AdminApi) -> Result<(), ClientError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(ClientError::Validation(
                "No category selected for deletion".to_string(),
            ));
        };

        match api.delete_category(id).await {
            Ok(()) => {
                self.categories.retain(|c| c.id != id);
                for category in &mut self.categories {
                    category.children.retain(|child| child.id != id);
                }
                self.error = None;
                tracing::info!(category_id = %id, "Category deleted");
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn find(&self, id: Uuid) -> Option<&CategoryDto> {
        self.categories.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{category, MockAdminApi};
    use crate::features::categories::dtos::CategoryChildDto;

    /// Listing as the API returns it: children embedded in their parents
    fn listing() -> Vec<CategoryDto> {
        let mut clothing = category("Clothing", None, 0);
        let dresses = category("Dresses", Some(clothing.id), 3);
        let towels = category("Towels", None, 0);
        clothing.children.push(CategoryChildDto {
            id: dresses.id,
            name: dresses.name.clone(),
            slug: dresses.slug.clone(),
            count: dresses.count,
        });
        vec![clothing, dresses, towels]
    }

    #[tokio::test]
    async fn test_groups_follow_input_order() {
        let all = listing();
        let api = MockAdminApi::with_categories(all.clone());
        let mut page = CategoryListPage::new();
        page.load(&api).await.unwrap();

        let groups = page.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].root.id, all[0].id);
        assert_eq!(groups[0].children[0].id, all[1].id);
        assert_eq!(groups[1].root.id, all[2].id);
        assert!(groups[1].children.is_empty());
    }

    #[tokio::test]
    async fn test_blocked_categories_cannot_be_confirmed() {
        let all = listing();
        let api = MockAdminApi::with_categories(all.clone());
        let mut page = CategoryListPage::new();
        page.load(&api).await.unwrap();

        let err = page.request_delete(all[0].id).unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete category with subcategories.");

        let err = page.request_delete(all[1].id).unwrap_err();
        assert_eq!(err.to_string(), "Cannot delete category with products.");
        assert!(page.pending_delete().is_none());
        assert_eq!(api.write_calls(), 0);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_locally() {
        let all = listing();
        let api = MockAdminApi::with_categories(all.clone());
        let mut page = CategoryListPage::new();
        page.load(&api).await.unwrap();

        page.request_delete(all[2].id).unwrap();
        assert_eq!(page.pending_delete().unwrap().name, "Towels");

        page.confirm_delete(&api).await.unwrap();
        assert_eq!(page.categories().len(), 2);
        assert!(!api.stored_ids().contains(&all[2].id));
    }

    #[tokio::test]
    async fn test_deleting_last_child_unblocks_parent() {
        let mut all = listing();
        all[1].count.products = 0;
        all[0].children[0].count.products = 0;
        let api = MockAdminApi::with_categories(all.clone());
        let mut page = CategoryListPage::new();
        page.load(&api).await.unwrap();

        page.request_delete(all[1].id).unwrap();
        page.confirm_delete(&api).await.unwrap();

        assert!(page.groups()[0].children.is_empty());
        assert!(page.categories()[0].children.is_empty());
        assert!(page.delete_gate(all[0].id).unwrap().is_deletable());
        assert!(page.request_delete(all[0].id).is_ok());
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state_unchanged() {
        let all = listing();
        let api = MockAdminApi::with_categories(all.clone());
        let mut page = CategoryListPage::new();
        page.load(&api).await.unwrap();

        page.request_delete(all[2].id).unwrap();
        api.fail_next(409, "Cannot delete category with products.");

        assert!(page.confirm_delete(&api).await.is_err());
        assert_eq!(page.categories().len(), 3);
        assert_eq!(page.error(), Some("Cannot delete category with products."));
    }

    #[tokio::test]
    async fn test_load_failure_uses_fallback_message() {
        let api = MockAdminApi::default();
        api.fail_next(500, "");
        let mut page = CategoryListPage::new();

        assert!(page.load(&api).await.is_err());
        assert!(!page.is_loaded());
        assert_eq!(page.error(), Some("Request failed with status 500"));
    }
}
