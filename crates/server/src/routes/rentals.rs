use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::types::MessageResponse;
use serde::Deserialize;
use serde_json::{json, Value};
use service::rental::domain::{NewRentalRequest, RentalFilter, RentalUpdate};
use service::rental::RentalRequest;
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ApproveQuery {
    pub car_id: Uuid,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct RejectQuery {
    #[serde(default)]
    pub reason: String,
}

#[utoipa::path(
    post, path = "/rentals", tag = "rentals",
    request_body = crate::openapi::NewRentalRequestDoc,
    responses(
        (status = 201, description = "Submitted"),
        (status = 400, description = "Invalid Request", body = crate::errors::ErrorBody)
    )
)]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<NewRentalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(input) = payload?;
    let receipt = state.rentals.submit(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Rental request submitted successfully! Admin will review your request.",
            "requestId": receipt.id,
            "customerName": receipt.customer_name,
            "status": receipt.status,
            "rentalDays": receipt.rental_days,
            "totalAmount": receipt.total_amount,
        })),
    ))
}

#[utoipa::path(
    get, path = "/rentals", tag = "rentals",
    params(
        ("customer" = Option<String>, Query, description = "Customer name substring"),
        ("status" = Option<String>, Query, description = "PENDING, APPROVED or REJECTED")
    ),
    responses((status = 200, description = "Rental requests"))
)]
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<RentalFilter>, QueryRejection>,
) -> Result<Json<Vec<RentalRequest>>, ApiError> {
    let Query(filter) = query?;
    Ok(Json(state.rentals.search(&filter).await?))
}

#[utoipa::path(get, path = "/rentals/pending", tag = "rentals", responses((status = 200, description = "Pending requests")))]
pub async fn pending(State(state): State<AppState>) -> Result<Json<Vec<RentalRequest>>, ApiError> {
    Ok(Json(state.rentals.pending().await?))
}

#[utoipa::path(
    get, path = "/rentals/customer/{name}", tag = "rentals",
    params(("name" = String, Path, description = "Customer name substring")),
    responses((status = 200, description = "Matching requests"))
)]
pub async fn by_customer(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<RentalRequest>>, ApiError> {
    Ok(Json(state.rentals.by_customer(&name).await?))
}

#[utoipa::path(
    get, path = "/rentals/{id}", tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental request ID")),
    responses((status = 200, description = "Rental request"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RentalRequest>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.rentals.get(id).await?))
}

#[utoipa::path(
    put, path = "/rentals/{id}", tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental request ID")),
    request_body = crate::openapi::RentalUpdateDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RentalUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let updated = state.rentals.update(id, patch).await?;
    Ok(Json(json!({
        "message": "Rental request updated successfully",
        "requestId": updated.id,
        "customerName": updated.customer_name,
        "status": updated.status,
    })))
}

#[utoipa::path(
    delete, path = "/rentals/{id}", tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental request ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found", body = crate::errors::ErrorBody))
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.rentals.delete(id).await?;
    Ok(Json(MessageResponse::new("Rental request deleted successfully")))
}

#[utoipa::path(
    post, path = "/rentals/{id}/approve", tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental request ID"), ApproveQuery),
    responses(
        (status = 200, description = "Approved"),
        (status = 404, description = "Request or car not found", body = crate::errors::ErrorBody),
        (status = 409, description = "Not pending or car unavailable", body = crate::errors::ErrorBody)
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<ApproveQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(q) = query?;
    let approved = state.rentals.approve(id, q.car_id).await?;
    Ok(Json(json!({
        "message": "Rental request approved successfully",
        "requestId": approved.id,
        "customerName": approved.customer_name,
        "carModel": approved.car_model,
        "status": approved.status,
    })))
}

#[utoipa::path(
    post, path = "/rentals/{id}/reject", tag = "rentals",
    params(("id" = Uuid, Path, description = "Rental request ID"), RejectQuery),
    responses(
        (status = 200, description = "Rejected"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 409, description = "Not pending", body = crate::errors::ErrorBody)
    )
)]
pub async fn reject(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<RejectQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Query(q) = query?;
    let rejected = state.rentals.reject(id, &q.reason).await?;
    Ok(Json(json!({
        "message": "Rental request rejected",
        "requestId": rejected.id,
        "customerName": rejected.customer_name,
        "status": rejected.status,
        "reason": rejected.rejection_reason,
    })))
}
