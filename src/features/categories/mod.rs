//! Category management for the back-office.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/categories` | All categories with parent, children and product counts |
//! | GET | `/api/admin/categories/{id}` | One category |
//! | POST | `/api/admin/categories` | Create |
//! | PUT | `/api/admin/categories/{id}` | Full replace |
//! | DELETE | `/api/admin/categories/{id}` | Delete when no products and no subcategories |

pub mod dtos;
pub mod handlers;
pub mod hierarchy;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
