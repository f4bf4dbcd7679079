use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::{ADMIN_PERMISSION, ADMIN_ROLE};

/// Session established from a verified access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// The admin permission flag: either the admin role or the explicit
    /// back-office permission grants access.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE) || self.has_permission(ADMIN_PERMISSION)
    }
}

/// Provider-namespaced claims carried inside the access token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}
