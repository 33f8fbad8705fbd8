use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::Request;
use axum::http::{header, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("You don't have permission to access this resource")]
    AccessDenied,
    #[error("{0}")]
    Internal(String),
}

/// Uniform error payload. `path` is filled in by [`attach_error_path`].
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Resource Not Found",
            ApiError::InvalidInput(_) => "Invalid Request",
            ApiError::Conflict(_) => "Business Rule Violation",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::AccessDenied => "Access Denied",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: self.title().to_string(),
            message,
            path: String::new(),
        };
        let mut res = (status, Json(body.clone())).into_response();
        res.extensions_mut().insert(body);
        res
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidInput(m) => ApiError::InvalidInput(m),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials | AuthError::Validation(_) => ApiError::InvalidInput(e.to_string()),
            AuthError::Conflict => ApiError::Conflict(e.to_string()),
            other => ApiError::Internal(format!("auth error {}: {}", other.code(), other)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self { ApiError::InvalidInput(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self { ApiError::InvalidInput(e.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self { ApiError::InvalidInput(e.body_text()) }
}

/// Re-render error responses with the request path filled in. Errors
/// produced by the router itself (405 and friends) carry no [`ErrorBody`],
/// so one is built from the status.
pub async fn attach_error_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();
    let res = next.run(req).await;
    let status = res.status();
    let mut body = match res.extensions().get::<ErrorBody>().cloned() {
        Some(body) => body,
        None if status.is_client_error() || status.is_server_error() => ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: if status == StatusCode::METHOD_NOT_ALLOWED {
                format!("Request method '{}' is not supported", method)
            } else {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            },
            path: String::new(),
        },
        None => return res,
    };
    if body.status >= 500 {
        warn!(path = %path, status = body.status, "responding with server error");
    }
    body.path = path;
    let mut rendered = (status, Json(body)).into_response();
    for (name, value) in res.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}

/// Router fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No handler found for {}", uri.path()))
}
