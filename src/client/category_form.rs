//! Create/edit form for one category.

use uuid::Uuid;

use crate::client::api::AdminApi;
use crate::client::error::ClientError;
use crate::client::CATEGORY_LIST_PATH;
use crate::features::categories::dtos::{CategoryDto, CategoryPayload, CategoryRefDto};
use crate::features::categories::hierarchy::parent_candidates;
use crate::shared::slug::slugify;
use crate::shared::validation::non_blank;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and slug are required";
pub const NOT_LOADED_MESSAGE: &str = "Category not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: Uuid },
    /// Edit page whose category never loaded; submitting is refused
    EditUnloaded,
}

/// How name edits treat a slug the user typed by hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlugPolicy {
    /// Every name change re-derives the slug
    #[default]
    AlwaysDerive,
    /// Stop deriving once the slug was edited manually
    PreserveManual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    /// Edit page addressed a slug that does not exist
    NotFound,
    Saved { navigate_to: String },
}

#[derive(Debug, Clone)]
pub struct CategoryForm {
    mode: FormMode,
    policy: SlugPolicy,
    status: FormStatus,
    name: String,
    slug: String,
    slug_edited: bool,
    description: String,
    image: String,
    parent_id: Option<Uuid>,
    candidates: Vec<CategoryRefDto>,
    error: Option<String>,
}

impl CategoryForm {
    pub fn new(policy: SlugPolicy) -> Self {
        Self {
            mode: FormMode::Create,
            policy,
            status: FormStatus::Editing,
            name: String::new(),
            slug: String::new(),
            slug_edited: false,
            description: String::new(),
            image: String::new(),
            parent_id: None,
            candidates: Vec::new(),
            error: None,
        }
    }

    /// Create form with its parent selector filled in
    pub async fn load_for_create(api: &dyn AdminApi, policy: SlugPolicy) -> Self {
        let mut form = Self::new(policy);
        match api.list_categories().await {
            Ok(all) => form.candidates = candidates_from(&all, None),
            Err(e) => form.error = Some(e.to_string()),
        }
        form
    }

    /// Edit form for the category with `slug`.
    ///
    /// The list is searched by slug, then the record itself is fetched by id.
    pub async fn load_for_edit(api: &dyn AdminApi, slug: &str, policy: SlugPolicy) -> Self {
        let mut form = Self::new(policy);
        form.mode = FormMode::EditUnloaded;

        let all = match api.list_categories().await {
            Ok(all) => all,
            Err(e) => {
                form.error = Some(e.to_string());
                return form;
            }
        };

        let Some(id) = all.iter().find(|c| c.slug == slug).map(|c| c.id) else {
            tracing::debug!(slug, "Category to edit not found");
            form.status = FormStatus::NotFound;
            return form;
        };

        match api.get_category(id).await {
            Ok(category) => {
                form.mode = FormMode::Edit { id };
                form.candidates = candidates_from(&all, Some(id));
                form.populate(category);
            }
            Err(ClientError::NotFound(_)) => form.status = FormStatus::NotFound,
            Err(e) => form.error = Some(e.to_string()),
        }

        form
    }

    fn populate(&mut self, category: CategoryDto) {
        self.name = category.name;
        self.slug = category.slug;
        self.description = category.description.unwrap_or_default();
        self.image = category.image.unwrap_or_default();
        self.parent_id = category.parent_id;
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }

    /// Roots other than the category being edited
    pub fn parent_candidates(&self) -> &[CategoryRefDto] {
        &self.candidates
    }

    /// Last API or load error, shown verbatim
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if self.policy == SlugPolicy::AlwaysDerive || !self.slug_edited {
            self.slug = slugify(&self.name);
        }
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.slug_edited = true;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.image = image.into();
    }

    /// Choose a parent; only listed candidates are accepted
    pub fn set_parent(&mut self, parent_id: Option<Uuid>) -> Result<(), ClientError> {
        if let Some(id) = parent_id {
            if !self.candidates.iter().any(|c| c.id == id) {
                return Err(ClientError::Validation(
                    "Parent must be a top-level category other than this one".to_string(),
                ));
            }
        }
        self.parent_id = parent_id;
        Ok(())
    }

    /// Request body, or a validation error when a required field is empty
    pub fn payload(&self) -> Result<CategoryPayload, ClientError> {
        let name = self.name.trim();
        let slug = self.slug.trim();
        if name.is_empty() || slug.is_empty() {
            return Err(ClientError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        Ok(CategoryPayload {
            name: name.to_string(),
            slug: slug.to_string(),
            description: non_blank(Some(self.description.clone())),
            image: non_blank(Some(self.image.clone())),
            parent_id: self.parent_id,
        })
    }

    /// Validate locally, then create or replace. On failure the input is kept
    /// and the error message is stored for display.
    pub async fn submit(&mut self, api: &dyn AdminApi) -> Result<CategoryDto, ClientError> {
        let result = match (self.mode, self.payload()) {
            (FormMode::EditUnloaded, _) => {
                Err(ClientError::NotFound(NOT_LOADED_MESSAGE.to_string()))
            }
            (_, Err(e)) => Err(e),
            (FormMode::Create, Ok(payload)) => api.create_category(&payload).await,
            (FormMode::Edit { id }, Ok(payload)) => api.update_category(id, &payload).await,
        };

        match result {
            Ok(category) => {
                self.error = None;
                self.status = FormStatus::Saved {
                    navigate_to: CATEGORY_LIST_PATH.to_string(),
                };
                tracing::info!(category_id = %category.id, "Category saved");
                Ok(category)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

fn candidates_from(all: &[CategoryDto], editing: Option<Uuid>) -> Vec<CategoryRefDto> {
    parent_candidates(all, editing)
        .into_iter()
        .map(|c| CategoryRefDto {
            id: c.id,
            name: c.name.clone(),
            slug: c.slug.clone(),
        })
        .collect()
}
