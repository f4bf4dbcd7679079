// =============================================================================
// AUTHORIZATION
// =============================================================================

/// Role that grants access to the back-office
pub const ADMIN_ROLE: &str = "admin";

/// Permission that grants access to the back-office without the role
pub const ADMIN_PERMISSION: &str = "admin:access";

// =============================================================================
// IMAGES
// =============================================================================

/// Folder (relative to the site root) the image picker is scoped to
pub const IMAGE_ROOT_FOLDER: &str = "/products";

/// File extensions recognized as images (lower-case, without dot)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Delimiter used to store several image paths in one form field.
/// Paths that contain it cannot be stored in a multi-image value.
pub const MULTI_IMAGE_DELIMITER: &str = ", ";

// =============================================================================
// DASHBOARD
// =============================================================================

/// Number of recent orders and top products returned by the dashboard
pub const DASHBOARD_LIST_LIMIT: i64 = 5;
