//! Image selection for one form field.

use crate::client::api::AdminApi;
use crate::features::images::catalog::{self, FolderFacet};
use crate::shared::constants::{IMAGE_ROOT_FOLDER, MULTI_IMAGE_DELIMITER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    /// Picking replaces the value and closes the picker
    Single,
    /// Picking appends to a delimited list and keeps the picker open
    Multiple,
}

/// Split a stored multi-image value into its paths.
///
/// A path containing the delimiter itself cannot survive the round trip,
/// so multiple-mode selection refuses such paths.
pub fn split_selection(value: &str) -> Vec<String> {
    value
        .split(MULTI_IMAGE_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_selection(paths: &[String]) -> String {
    paths.join(MULTI_IMAGE_DELIMITER)
}

#[derive(Debug, Clone)]
pub struct ImagePicker {
    mode: PickerMode,
    root: String,
    value: String,
    open: bool,
    folder: Option<String>,
    search: String,
    explicit: Option<Vec<String>>,
    fetched: Vec<String>,
}

impl ImagePicker {
    pub fn new(mode: PickerMode, value: impl Into<String>) -> Self {
        Self {
            mode,
            root: IMAGE_ROOT_FOLDER.to_string(),
            value: value.into(),
            open: false,
            folder: None,
            search: String::new(),
            explicit: None,
            fetched: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: &str) -> Self {
        self.root = catalog::normalize_path(root);
        self
    }

    /// Use this list instead of fetching one
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.explicit = Some(images);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    /// Open on the "all" facet, fetching the catalog unless one was given.
    ///
    /// A failed or empty fetch is not an error; the fallback list is used.
    pub async fn open(&mut self, api: &dyn AdminApi) {
        self.open = true;
        self.folder = None;

        if self.explicit.as_ref().is_some_and(|list| !list.is_empty()) {
            return;
        }

        match api.list_images().await {
            Ok(images) if !images.is_empty() => self.fetched = images,
            Ok(_) => tracing::debug!("Image listing empty, using fallback"),
            Err(e) => tracing::debug!(error = %e, "Image listing failed, using fallback"),
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Normalized images under the root folder
    pub fn catalog(&self) -> Vec<String> {
        catalog::effective_catalog(self.explicit.as_deref(), &self.fetched, &self.root)
    }

    pub fn facets(&self) -> Vec<FolderFacet> {
        catalog::folder_facets(&self.catalog())
    }

    pub fn set_folder(&mut self, folder: Option<String>) {
        self.folder = folder;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Catalog entries in the current folder matching the search term
    pub fn visible(&self) -> Vec<String> {
        let images = self.catalog();
        let visible: Vec<String> = catalog::visible(&images, self.folder.as_deref(), &self.search)
            .into_iter()
            .map(str::to_string)
            .collect();

        tracing::debug!(
            shown = visible.len(),
            total = images.len(),
            folder = self.folder.as_deref().unwrap_or("All"),
            "Image picker filtered"
        );
        visible
    }

    pub fn selected(&self) -> Vec<String> {
        match self.mode {
            PickerMode::Multiple => split_selection(&self.value),
            PickerMode::Single if self.value.trim().is_empty() => Vec::new(),
            PickerMode::Single => vec![self.value.clone()],
        }
    }

    pub fn select(&mut self, path: &str) {
        match self.mode {
            PickerMode::Single => {
                self.value = path.to_string();
                self.open = false;
            }
            PickerMode::Multiple => {
                if path.contains(MULTI_IMAGE_DELIMITER) {
                    tracing::debug!(path, "Path contains the selection delimiter; not selectable");
                    return;
                }
                let mut current = split_selection(&self.value);
                if !current.iter().any(|p| p == path) {
                    current.push(path.to_string());
                    self.value = join_selection(&current);
                }
            }
        }
    }

    /// Remove exactly one matching entry
    pub fn remove(&mut self, path: &str) {
        match self.mode {
            PickerMode::Single => self.value.clear(),
            PickerMode::Multiple => {
                let mut current = split_selection(&self.value);
                if let Some(index) = current.iter().position(|p| p == path) {
                    current.remove(index);
                }
                self.value = join_selection(&current);
            }
        }
    }
}
