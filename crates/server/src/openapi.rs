use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::errors::ErrorBody;
use crate::routes::{auth::LoginResponse, cars::{CarListResponse, ImageInput}};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarInputDoc {
    pub brand: String,
    pub model: String,
    pub fuel: Option<String>,
    pub car_type: Option<String>,
    pub plate_number: Option<String>,
    pub main_location: Option<String>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub year: Option<i32>,
    pub passengers: Option<i32>,
    pub no_of_air_bags: Option<i32>,
    pub description: Option<String>,
    pub daily_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub available: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInputDoc {
    pub name: String,
    pub description: Option<String>,
    pub available: Option<bool>,
    /// Owning car. Required on create; omitted on update keeps the current car.
    pub car_id: Option<Uuid>,
}

/// Dates use the local `YYYY-MM-DDTHH:MM:SS` form.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewRentalRequestDoc {
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub car_model: Option<String>,
    #[schema(example = "2030-06-01T10:00:00")]
    pub pickup_date_time: String,
    #[schema(example = "2030-06-04T10:00:00")]
    pub drop_date_time: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalUpdateDoc {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub car_model: Option<String>,
    pub pickup_date_time: Option<String>,
    pub drop_date_time: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequestDoc {
    pub id: Uuid,
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub car_model: Option<String>,
    pub pickup_date_time: String,
    pub drop_date_time: String,
    #[schema(example = "PENDING")]
    pub status: String,
    pub rejection_reason: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::auth::login,
        crate::routes::auth::test,
        crate::routes::auth::admin_test,
        crate::routes::public::info,
        crate::routes::public::test,
        crate::routes::public::health,
        crate::routes::cars::list,
        crate::routes::cars::list_simple,
        crate::routes::cars::available,
        crate::routes::cars::by_location,
        crate::routes::cars::get,
        crate::routes::cars::create,
        crate::routes::cars::update,
        crate::routes::cars::delete,
        crate::routes::cars::images,
        crate::routes::cars::add_image,
        crate::routes::cars::delete_image,
        crate::routes::accessories::list,
        crate::routes::accessories::available,
        crate::routes::accessories::by_car,
        crate::routes::accessories::get,
        crate::routes::accessories::create,
        crate::routes::accessories::update,
        crate::routes::accessories::delete,
        crate::routes::rentals::submit,
        crate::routes::rentals::list,
        crate::routes::rentals::pending,
        crate::routes::rentals::by_customer,
        crate::routes::rentals::get,
        crate::routes::rentals::update,
        crate::routes::rentals::delete,
        crate::routes::rentals::approve,
        crate::routes::rentals::reject,
    ),
    components(
        schemas(
            CarInputDoc,
            AccessoryInputDoc,
            NewRentalRequestDoc,
            RentalUpdateDoc,
            RentalRequestDoc,
            LoginResponse,
            CarListResponse,
            ImageInput,
            ErrorBody,
        )
    ),
    tags(
        (name = "auth", description = "Login and token checks"),
        (name = "public", description = "Unauthenticated service info"),
        (name = "cars", description = "Fleet and car images"),
        (name = "accessories", description = "Car accessories"),
        (name = "rentals", description = "Rental requests and approval workflow"),
    )
)]
pub struct ApiDoc;
