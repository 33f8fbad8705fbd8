use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{AccessoryInput, AccessoryView};
use super::repository::{AccessoryRecord, AccessoryRepository};
use crate::errors::ServiceError;

pub struct AccessoryService<R: AccessoryRepository> {
    repo: Arc<R>,
}

impl<R: AccessoryRepository> AccessoryService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<AccessoryView>, ServiceError> {
        Ok(self.repo.list().await?.into_iter().map(Into::into).collect())
    }

    pub async fn list_by_car(&self, car_id: Uuid) -> Result<Vec<AccessoryView>, ServiceError> {
        Ok(self.repo.list_by_car(car_id).await?.into_iter().map(Into::into).collect())
    }

    pub async fn list_available(&self) -> Result<Vec<AccessoryView>, ServiceError> {
        Ok(self.repo.list_available().await?.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<AccessoryView, ServiceError> {
        self.repo
            .get(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::not_found("Accessory", id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: AccessoryInput) -> Result<AccessoryView, ServiceError> {
        models::accessory::validate_name(&input.name)?;
        let car_id = input.car_id.ok_or_else(|| ServiceError::invalid("carId is required"))?;
        self.ensure_car(car_id).await?;
        let created = self
            .repo
            .create(AccessoryRecord {
                car_id,
                name: input.name.trim().to_string(),
                description: input.description,
                available: input.available.unwrap_or(true),
            })
            .await?;
        info!(accessory_id = %created.id, car_id = %car_id, "accessory_created");
        Ok(created.into())
    }

    /// Missing `carId` keeps the current car; a different one re-parents.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: AccessoryInput) -> Result<AccessoryView, ServiceError> {
        models::accessory::validate_name(&input.name)?;
        let current = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Accessory", id))?;
        let car_id = input.car_id.unwrap_or(current.car_id);
        if car_id != current.car_id {
            self.ensure_car(car_id).await?;
        }
        let updated = self
            .repo
            .update(
                id,
                AccessoryRecord {
                    car_id,
                    name: input.name.trim().to_string(),
                    description: input.description,
                    available: input.available.unwrap_or(current.available),
                },
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Accessory", id))?;
        info!(accessory_id = %id, car_id = %car_id, "accessory_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Accessory", id));
        }
        info!(accessory_id = %id, "accessory_deleted");
        Ok(())
    }

    async fn ensure_car(&self, car_id: Uuid) -> Result<(), ServiceError> {
        if self.repo.car_exists(car_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Car", car_id))
        }
    }
}
