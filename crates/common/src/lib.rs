//! Shared building blocks used by every crate in the workspace:
//! logging bootstrap, small response types and the PII field cipher.

pub mod types;
pub mod crypto;
pub mod utils;

pub use crypto::{CryptoError, FieldCipher};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::up("Car Rental API");
        assert_eq!(h.status, "UP");
        assert_eq!(h.service, "Car Rental API");
    }
}
