use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{access, errors, openapi::ApiDoc, state::AppState};

pub mod accessories;
pub mod auth;
pub mod cars;
pub mod public;
pub mod rentals;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router: public, authenticated and admin
/// routes behind the access policy, plus Swagger UI.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // auth
        .route("/auth/login", post(auth::login))
        .route("/auth/test", get(auth::test))
        .route("/auth/admin-test", get(auth::admin_test))
        // public info
        .route("/public/info", get(public::info))
        .route("/public/test", get(public::test))
        .route("/public/health", get(public::health))
        // cars
        .route("/cars", get(cars::list).post(cars::create))
        .route("/cars/simple", get(cars::list_simple))
        .route("/cars/available", get(cars::available))
        .route("/cars/location/:location", get(cars::by_location))
        .route("/cars/:id", get(cars::get).put(cars::update).delete(cars::delete))
        .route("/cars/:id/images", get(cars::images).post(cars::add_image))
        .route("/cars/:id/images/:image_id", delete(cars::delete_image))
        // accessories
        .route("/accessories", get(accessories::list).post(accessories::create))
        .route("/accessories/available", get(accessories::available))
        .route("/accessories/car/:car_id", get(accessories::by_car))
        .route(
            "/accessories/:id",
            get(accessories::get).put(accessories::update).delete(accessories::delete),
        )
        // rentals
        .route("/rentals", get(rentals::list).post(rentals::submit))
        .route("/rentals/pending", get(rentals::pending))
        .route("/rentals/customer/:name", get(rentals::by_customer))
        .route("/rentals/:id", get(rentals::get).put(rentals::update).delete(rentals::delete))
        .route("/rentals/:id/approve", post(rentals::approve))
        .route("/rentals/:id/reject", post(rentals::reject))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(errors::not_found);

    api.layer(middleware::from_fn_with_state(state.clone(), access::authorize))
        .layer(middleware::from_fn(errors::attach_error_path))
        .with_state(state)
        .layer(build_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
