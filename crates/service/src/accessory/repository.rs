use async_trait::async_trait;
use chrono::Utc;
use models::{accessory, car};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Fields written on create/update, already validated by the service.
#[derive(Debug, Clone)]
pub struct AccessoryRecord {
    pub car_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub available: bool,
}

#[async_trait]
pub trait AccessoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<accessory::Model>, ServiceError>;
    async fn list_by_car(&self, car_id: Uuid) -> Result<Vec<accessory::Model>, ServiceError>;
    async fn list_available(&self) -> Result<Vec<accessory::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<accessory::Model>, ServiceError>;
    async fn create(&self, record: AccessoryRecord) -> Result<accessory::Model, ServiceError>;
    async fn update(&self, id: Uuid, record: AccessoryRecord) -> Result<Option<accessory::Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn car_exists(&self, car_id: Uuid) -> Result<bool, ServiceError>;
}

pub struct SeaOrmAccessoryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AccessoryRepository for SeaOrmAccessoryRepository {
    async fn list(&self) -> Result<Vec<accessory::Model>, ServiceError> {
        Ok(accessory::Entity::find().order_by_asc(accessory::Column::CreatedAt).all(&self.db).await?)
    }

    async fn list_by_car(&self, car_id: Uuid) -> Result<Vec<accessory::Model>, ServiceError> {
        Ok(accessory::Entity::find()
            .filter(accessory::Column::CarId.eq(car_id))
            .order_by_asc(accessory::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_available(&self) -> Result<Vec<accessory::Model>, ServiceError> {
        Ok(accessory::Entity::find()
            .filter(accessory::Column::Available.eq(true))
            .order_by_asc(accessory::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<accessory::Model>, ServiceError> {
        Ok(accessory::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, record: AccessoryRecord) -> Result<accessory::Model, ServiceError> {
        let am = accessory::ActiveModel {
            id: Set(Uuid::new_v4()),
            car_id: Set(record.car_id),
            name: Set(record.name),
            description: Set(record.description),
            available: Set(record.available),
            created_at: Set(Utc::now().into()),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, record: AccessoryRecord) -> Result<Option<accessory::Model>, ServiceError> {
        let Some(found) = accessory::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: accessory::ActiveModel = found.into();
        am.car_id = Set(record.car_id);
        am.name = Set(record.name);
        am.description = Set(record.description);
        am.available = Set(record.available);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = accessory::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn car_exists(&self, car_id: Uuid) -> Result<bool, ServiceError> {
        Ok(car::Entity::find_by_id(car_id).one(&self.db).await?.is_some())
    }
}
