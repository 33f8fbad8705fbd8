use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_USER: &str = "USER";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if trimmed.len() > 128 {
        return Err(ModelError::Validation("username too long".into()));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), ModelError> {
    match role {
        ROLE_ADMIN | ROLE_USER => Ok(()),
        other => Err(ModelError::Validation(format!("unknown role {}", other))),
    }
}
