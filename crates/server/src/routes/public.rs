use axum::Json;
use chrono::Utc;
use common::types::Health;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Car Rental API";

#[utoipa::path(get, path = "/public/info", tag = "public", responses((status = 200, description = "Service information")))]
pub async fn info() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Car Rental System!",
        "userAccess": "You can view cars and submit rental requests without login",
        "adminAccess": "Admin login required for managing rentals, cars, and accessories",
        "currentTime": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[utoipa::path(get, path = "/public/test", tag = "public", responses((status = 200, description = "Public endpoint listing")))]
pub async fn test() -> Json<Value> {
    Json(json!({
        "status": "SUCCESS",
        "message": "This is a public endpoint - no authentication required",
        "availableActions": {
            "viewCars": "GET /cars",
            "viewAvailableCars": "GET /cars/available",
            "submitRentalRequest": "POST /rentals",
            "publicInfo": "GET /public/info",
        },
    }))
}

#[utoipa::path(get, path = "/public/health", tag = "public", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health::up(SERVICE_NAME))
}
