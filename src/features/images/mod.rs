//! Image catalog: the listing endpoint and the path helpers the picker uses.

pub mod catalog;
pub mod dto;
pub mod handler;
pub mod routes;
pub mod service;

pub use service::ImageService;
