//! Which chrome a page gets, and when it redirects instead.
//!
//! | Path | Session | Decision |
//! |------|---------|----------|
//! | `/admin/**` (incl. `/admin`) | none | redirect to sign-in with return URL |
//! | `/admin/**` | not admin | redirect to `/` |
//! | `/admin` | admin | redirect to `/admin/products` |
//! | `/admin/**` | admin | admin chrome with nav menu |
//! | `/handler/**` | any | bare chrome |
//! | anything else | any | site chrome |

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::AuthenticatedUser;

pub const ADMIN_ROOT: &str = "/admin";
pub const ADMIN_LANDING: &str = "/admin/products";
pub const AUTH_HANDLER_ROOT: &str = "/handler";
pub const SIGN_IN_PATH: &str = "/handler/sign-in";

/// Admin menu entries, in display order
pub const ADMIN_MENU: [(&str, &str); 6] = [
    ("Dashboard", "/admin"),
    ("Products", "/admin/products"),
    ("Categories", "/admin/categories"),
    ("Orders", "/admin/orders"),
    ("Users", "/admin/users"),
    ("Analytics", "/admin/analytics"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Chrome {
    /// Banner, navbar and footer around the page
    Site,
    /// Admin navbar and menu, no storefront chrome
    Admin,
    /// Page content only
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decision {
    Render { chrome: Chrome, menu: Vec<NavItem> },
    Redirect { location: String },
}

/// True when `path` is `root` itself or lies below it
fn within(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Strip query, fragment and trailing slashes; empty becomes `/`
fn clean(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

pub fn sign_in_redirect(return_to: &str) -> String {
    format!("{}?redirect={}", SIGN_IN_PATH, urlencoding::encode(return_to))
}

/// Admin menu with the entry for `path` marked active
pub fn admin_menu(path: &str) -> Vec<NavItem> {
    ADMIN_MENU
        .iter()
        .map(|(label, href)| NavItem {
            label: label.to_string(),
            href: href.to_string(),
            active: if *href == ADMIN_ROOT {
                path == ADMIN_ROOT
            } else {
                within(path, href)
            },
        })
        .collect()
}

pub fn resolve(path: &str, session: Option<&AuthenticatedUser>) -> Decision {
    let path = clean(path);

    if within(&path, ADMIN_ROOT) {
        let decision = match session {
            None => Decision::Redirect {
                location: sign_in_redirect(&path),
            },
            Some(user) if !user.is_admin() => Decision::Redirect {
                location: "/".to_string(),
            },
            Some(_) if path == ADMIN_ROOT => Decision::Redirect {
                location: ADMIN_LANDING.to_string(),
            },
            Some(_) => Decision::Render {
                chrome: Chrome::Admin,
                menu: admin_menu(&path),
            },
        };
        tracing::debug!(path = %path, ?decision, "Resolved admin route");
        return decision;
    }

    let chrome = if within(&path, AUTH_HANDLER_ROOT) {
        Chrome::Bare
    } else {
        Chrome::Site
    };

    Decision::Render {
        chrome,
        menu: Vec::new(),
    }
}
