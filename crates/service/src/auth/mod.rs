//! Auth module: three-layer architecture (domain, repository, service),
//! plus the bearer token issuer/validator shared with the HTTP layer.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use domain::Principal;
pub use service::AuthService;
pub use token::TokenService;
