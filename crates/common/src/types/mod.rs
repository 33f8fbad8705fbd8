use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
}

impl Health {
    pub fn up(service: &'static str) -> Self {
        Self { status: "UP", timestamp: Utc::now(), service }
    }
}

/// Plain `{"message": ...}` body for delete/ack style endpoints.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
