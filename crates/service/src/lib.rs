//! Service layer providing the rental back office business rules on top of models.
//! - Separates business logic from data access via repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod car;
pub mod accessory;
pub mod rental;
#[cfg(test)]
pub mod test_support;
