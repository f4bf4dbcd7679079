//! Route-level layout decisions for the storefront and back-office pages.

pub mod handler;
pub mod layout;
pub mod routes;
