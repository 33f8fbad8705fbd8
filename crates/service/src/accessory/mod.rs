//! Accessories attached to cars.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::AccessoryService;
