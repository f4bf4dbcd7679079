//! Typed client for the admin API and the page controllers built on it.
//!
//! Controllers are plain state machines: every async operation takes
//! `&mut self`, so a response can only ever land on the page that asked
//! for it.

pub mod api;
pub mod category_form;
pub mod category_list;
pub mod error;
pub mod image_picker;

#[cfg(test)]
pub mod mock;

pub use api::{AdminApi, HttpAdminClient};
pub use category_form::{CategoryForm, FormMode, FormStatus, SlugPolicy};
pub use category_list::CategoryListPage;
pub use error::ClientError;
pub use image_picker::{ImagePicker, PickerMode};

/// Where the category form goes after a successful save
pub const CATEGORY_LIST_PATH: &str = "/admin/categories";
