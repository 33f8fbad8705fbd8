use models::accessory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInput {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub available: Option<bool>,
    pub car_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
    pub car_id: Uuid,
}

impl From<accessory::Model> for AccessoryView {
    fn from(m: accessory::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, available: m.available, car_id: m.car_id }
    }
}
