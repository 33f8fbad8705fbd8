use models::{car, car_image};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create/update payload. Update replaces every descriptive field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
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

impl CarInput {
    pub fn prices(&self) -> [Option<f64>; 3] {
        [self.daily_price, self.weekly_price, self.monthly_price]
    }
}

/// Listing filters; substrings match case-insensitively.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilter {
    pub location: Option<String>,
    pub brand: Option<String>,
    #[serde(alias = "car_type")]
    pub car_type: Option<String>,
    pub available: Option<bool>,
}

/// Flat car representation as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarView {
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
    pub description: Option<String>,
    pub daily_price: Option<f64>,
    pub weekly_price: Option<f64>,
    pub monthly_price: Option<f64>,
    pub available: bool,
}

impl From<car::Model> for CarView {
    fn from(m: car::Model) -> Self {
        Self {
            id: m.id,
            brand: m.brand,
            model: m.model,
            fuel: m.fuel,
            car_type: m.car_type,
            plate_number: m.plate_number,
            main_location: m.main_location,
            color: m.color,
            transmission: m.transmission,
            year: m.year,
            passengers: m.passengers,
            no_of_air_bags: m.no_of_air_bags,
            description: m.description,
            daily_price: m.daily_price,
            weekly_price: m.weekly_price,
            monthly_price: m.monthly_price,
            available: m.available,
        }
    }
}

/// Car plus the names of its accessories and its image URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetail {
    #[serde(flatten)]
    pub car: CarView,
    pub accessories: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarImageView {
    pub id: Uuid,
    pub car_id: Uuid,
    pub image_url: String,
}

impl From<car_image::Model> for CarImageView {
    fn from(m: car_image::Model) -> Self {
        Self { id: m.id, car_id: m.car_id, image_url: m.image_url }
    }
}

pub(crate) fn trimmed(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
