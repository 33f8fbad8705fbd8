//! Car catalogue: validated CRUD, filtered listings and image URLs.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::CarService;
