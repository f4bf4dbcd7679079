mod jwks;
mod validator;

pub mod dto;
pub mod guards;
pub mod handler;
pub mod model;
pub mod routes;

pub use jwks::JwksClient;
pub use model::AuthenticatedUser;
pub use validator::{JwtValidator, TokenVerifier};
