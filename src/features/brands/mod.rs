//! Brands.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/brands` | All brands with product counts |
//! | POST | `/api/admin/brands` | Create; slug derived from the name when omitted |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::BrandService;
