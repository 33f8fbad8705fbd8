use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::car;
use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car_image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub car_id: Uuid,
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Car,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Car => Entity::belongs_to(car::Entity)
                .from(Column::CarId)
                .to(car::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<car::Entity> for Entity {
    fn to() -> RelationDef { Relation::Car.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_url(url: &str) -> Result<(), ModelError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ModelError::Validation("imageUrl is required".into()));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ModelError::Validation("imageUrl must be an http(s) URL".into()));
    }
    Ok(())
}
