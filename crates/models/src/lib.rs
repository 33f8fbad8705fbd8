//! SeaORM entities for the rental back office plus connection helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod car;
pub mod accessory;
pub mod car_image;
pub mod rental_request;

#[cfg(test)]
mod tests;
