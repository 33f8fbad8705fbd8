//! HTTP boundary for the rental back office.

pub mod access;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use routes::build_router;
pub use startup::{run, run_with_config};
pub use state::AppState;
