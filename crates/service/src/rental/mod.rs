//! Rental-request lifecycle: public submission, admin review
//! (PENDING → APPROVED | REJECTED) and PII-encrypted persistence.

pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{RentalRequest, RentalStatus};
pub use service::RentalService;
