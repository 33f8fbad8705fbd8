use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::types::MessageResponse;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use service::car::domain::{CarDetail, CarFilter, CarImageView, CarInput, CarView};
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarListResponse {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<CarDetail>,
    pub total_data: usize,
    pub status: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    #[serde(default)]
    pub image_url: String,
}

#[utoipa::path(
    get, path = "/cars", tag = "cars",
    params(
        ("location" = Option<String>, Query, description = "Location substring"),
        ("brand" = Option<String>, Query, description = "Brand substring"),
        ("carType" = Option<String>, Query, description = "Car type substring"),
        ("available" = Option<bool>, Query, description = "Only available cars when true")
    ),
    responses((status = 200, description = "Cars with accessories and images", body = CarListResponse))
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CarFilter>, QueryRejection>,
) -> Result<Json<CarListResponse>, ApiError> {
    let Query(filter) = query?;
    let data = state.cars.list(&filter).await?;
    Ok(Json(CarListResponse { total_data: data.len(), data, status: "success".into() }))
}

#[utoipa::path(get, path = "/cars/simple", tag = "cars", responses((status = 200, description = "Flat car list")))]
pub async fn list_simple(State(state): State<AppState>) -> Result<Json<Vec<CarView>>, ApiError> {
    Ok(Json(state.cars.list_simple().await?))
}

#[utoipa::path(get, path = "/cars/available", tag = "cars", responses((status = 200, description = "Available cars")))]
pub async fn available(State(state): State<AppState>) -> Result<Json<Vec<CarView>>, ApiError> {
    Ok(Json(state.cars.available().await?))
}

#[utoipa::path(
    get, path = "/cars/location/{location}", tag = "cars",
    params(("location" = String, Path, description = "Location substring")),
    responses((status = 200, description = "Cars at location"))
)]
pub async fn by_location(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<Vec<CarView>>, ApiError> {
    Ok(Json(state.cars.by_location(&location).await?))
}

#[utoipa::path(
    get, path = "/cars/{id}", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID")),
    responses((status = 200, description = "Car detail"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CarDetail>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.cars.get(id).await?))
}

#[utoipa::path(
    post, path = "/cars", tag = "cars",
    request_body = crate::openapi::CarInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Request", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CarInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let car = state.cars.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Car added successfully",
            "carId": car.id,
            "brand": car.brand,
            "model": car.model,
        })),
    ))
}

#[utoipa::path(
    put, path = "/cars/{id}", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID")),
    request_body = crate::openapi::CarInputDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<CarInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let car = state.cars.update(id, input).await?;
    Ok(Json(json!({ "message": "Car updated successfully", "carId": car.id })))
}

#[utoipa::path(
    delete, path = "/cars/{id}", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.cars.delete(id).await?;
    Ok(Json(MessageResponse::new("Car deleted successfully")))
}

#[utoipa::path(
    get, path = "/cars/{id}/images", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID")),
    responses((status = 200, description = "Images of the car"))
)]
pub async fn images(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<CarImageView>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.cars.images(id).await?))
}

#[utoipa::path(
    post, path = "/cars/{id}/images", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID")),
    request_body = ImageInput,
    responses((status = 201, description = "Image added"), (status = 400, description = "Invalid Request", body = crate::errors::ErrorBody))
)]
pub async fn add_image(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ImageInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CarImageView>), ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let image = state.cars.add_image(id, &input.image_url).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

#[utoipa::path(
    delete, path = "/cars/{id}/images/{image_id}", tag = "cars",
    params(("id" = Uuid, Path, description = "Car ID"), ("image_id" = Uuid, Path, description = "Image ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn delete_image(
    State(state): State<AppState>,
    ids: Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path((car_id, image_id)) = ids?;
    state.cars.delete_image(car_id, image_id).await?;
    Ok(Json(MessageResponse::new("Car image deleted successfully")))
}
