use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use common::types::MessageResponse;
use service::accessory::domain::{AccessoryInput, AccessoryView};
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

#[utoipa::path(get, path = "/accessories", tag = "accessories", responses((status = 200, description = "All accessories")))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AccessoryView>>, ApiError> {
    Ok(Json(state.accessories.list().await?))
}

#[utoipa::path(get, path = "/accessories/available", tag = "accessories", responses((status = 200, description = "Available accessories")))]
pub async fn available(State(state): State<AppState>) -> Result<Json<Vec<AccessoryView>>, ApiError> {
    Ok(Json(state.accessories.list_available().await?))
}

#[utoipa::path(
    get, path = "/accessories/car/{car_id}", tag = "accessories",
    params(("car_id" = Uuid, Path, description = "Car ID")),
    responses((status = 200, description = "Accessories of the car"))
)]
pub async fn by_car(
    State(state): State<AppState>,
    car_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<AccessoryView>>, ApiError> {
    let Path(car_id) = car_id?;
    Ok(Json(state.accessories.list_by_car(car_id).await?))
}

#[utoipa::path(
    get, path = "/accessories/{id}", tag = "accessories",
    params(("id" = Uuid, Path, description = "Accessory ID")),
    responses((status = 200, description = "Accessory"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AccessoryView>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.accessories.get(id).await?))
}

#[utoipa::path(
    post, path = "/accessories", tag = "accessories",
    request_body = crate::openapi::AccessoryInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Request", body = crate::errors::ErrorBody),
        (status = 404, description = "Car not found", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AccessoryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<AccessoryView>), ApiError> {
    let Json(input) = payload?;
    Ok((StatusCode::CREATED, Json(state.accessories.create(input).await?)))
}

#[utoipa::path(
    put, path = "/accessories/{id}", tag = "accessories",
    params(("id" = Uuid, Path, description = "Accessory ID")),
    request_body = crate::openapi::AccessoryInputDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AccessoryInput>, JsonRejection>,
) -> Result<Json<AccessoryView>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.accessories.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/accessories/{id}", tag = "accessories",
    params(("id" = Uuid, Path, description = "Accessory ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.accessories.delete(id).await?;
    Ok(Json(MessageResponse::new("Accessory deleted successfully")))
}
