use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{accessory, car_image};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub daily_price: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub weekly_price: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub monthly_price: Option<f64>,
    pub available: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Accessory,
    CarImage,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Accessory => Entity::has_many(accessory::Entity).into(),
            Relation::CarImage => Entity::has_many(car_image::Entity).into(),
        }
    }
}

impl Related<accessory::Entity> for Entity {
    fn to() -> RelationDef { Relation::Accessory.def() }
}

impl Related<car_image::Entity> for Entity {
    fn to() -> RelationDef { Relation::CarImage.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Human label used when a rental request has no car model of its own.
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Brand and model must be present; any given price must not be negative.
/// Width of the `brand` and `model` columns.
pub const NAME_MAX_LEN: usize = 128;

pub fn validate(brand: &str, model: &str, prices: [Option<f64>; 3]) -> Result<(), ModelError> {
    if brand.trim().is_empty() {
        return Err(ModelError::Validation("brand is required".into()));
    }
    if model.trim().is_empty() {
        return Err(ModelError::Validation("model is required".into()));
    }
    for (name, value) in [("brand", brand), ("model", model)] {
        if value.trim().chars().count() > NAME_MAX_LEN {
            return Err(ModelError::Validation(format!("{} must be at most {} characters", name, NAME_MAX_LEN)));
        }
    }
    for (name, price) in ["dailyPrice", "weeklyPrice", "monthlyPrice"].iter().zip(prices) {
        if let Some(p) = price {
            if p.is_nan() || p < 0.0 {
                return Err(ModelError::Validation(format!("{} must not be negative", name)));
            }
        }
    }
    Ok(())
}
