pub mod auth;
pub mod brands;
pub mod categories;
pub mod dashboard;
pub mod images;
pub mod navigation;
pub mod products;
