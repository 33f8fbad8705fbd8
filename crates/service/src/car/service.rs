use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CarDetail, CarFilter, CarImageView, CarInput, CarView};
use super::repository::CarRepository;
use crate::errors::ServiceError;

/// Car catalogue business rules on top of a [`CarRepository`].
pub struct CarService<R: CarRepository> {
    repo: Arc<R>,
}

impl<R: CarRepository> CarService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &CarFilter) -> Result<Vec<CarDetail>, ServiceError> {
        let cars = self.repo.list(filter).await?;
        info!(count = cars.len(), "cars listed");
        self.details(cars).await
    }

    /// Cars without accessory or image lookups.
    pub async fn list_simple(&self) -> Result<Vec<CarView>, ServiceError> {
        let cars = self.repo.list(&CarFilter::default()).await?;
        Ok(cars.into_iter().map(CarView::from).collect())
    }

    pub async fn available(&self) -> Result<Vec<CarView>, ServiceError> {
        let filter = CarFilter { available: Some(true), ..CarFilter::default() };
        Ok(self.repo.list(&filter).await?.into_iter().map(CarView::from).collect())
    }

    pub async fn by_location(&self, location: &str) -> Result<Vec<CarView>, ServiceError> {
        let filter = CarFilter { location: Some(location.to_string()), ..CarFilter::default() };
        Ok(self.repo.list(&filter).await?.into_iter().map(CarView::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<CarDetail, ServiceError> {
        let car = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Car", id))?;
        let mut details = self.details(vec![car]).await?;
        details.pop().ok_or_else(|| ServiceError::not_found("Car", id))
    }

    #[instrument(skip(self, input), fields(brand = %input.brand, model = %input.model))]
    pub async fn create(&self, input: CarInput) -> Result<CarView, ServiceError> {
        models::car::validate(&input.brand, &input.model, input.prices())?;
        let created = self.repo.create(&input).await?;
        info!(car_id = %created.id, "car_created");
        Ok(created.into())
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: CarInput) -> Result<CarView, ServiceError> {
        models::car::validate(&input.brand, &input.model, input.prices())?;
        let updated = self
            .repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ServiceError::not_found("Car", id))?;
        info!(car_id = %id, "car_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Car", id));
        }
        info!(car_id = %id, "car_deleted");
        Ok(())
    }

    pub async fn images(&self, car_id: Uuid) -> Result<Vec<CarImageView>, ServiceError> {
        self.ensure_exists(car_id).await?;
        Ok(self.repo.images(car_id).await?.into_iter().map(CarImageView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn add_image(&self, car_id: Uuid, url: &str) -> Result<CarImageView, ServiceError> {
        models::car_image::validate_url(url)?;
        self.ensure_exists(car_id).await?;
        let image = self.repo.add_image(car_id, url).await?;
        info!(car_id = %car_id, image_id = %image.id, "car_image_added");
        Ok(image.into())
    }

    pub async fn delete_image(&self, car_id: Uuid, image_id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete_image(car_id, image_id).await? {
            return Err(ServiceError::not_found("Car image", image_id));
        }
        Ok(())
    }

    async fn ensure_exists(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.repo.get(id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found("Car", id)),
        }
    }

    /// Attach accessory names and image URLs with one query per child table.
    async fn details(&self, cars: Vec<models::car::Model>) -> Result<Vec<CarDetail>, ServiceError> {
        let ids: Vec<Uuid> = cars.iter().map(|c| c.id).collect();
        let mut accessories: HashMap<Uuid, Vec<String>> = HashMap::new();
        for a in self.repo.accessories_of(&ids).await? {
            accessories.entry(a.car_id).or_default().push(a.name);
        }
        let mut images: HashMap<Uuid, Vec<String>> = HashMap::new();
        for i in self.repo.images_of(&ids).await? {
            images.entry(i.car_id).or_default().push(i.image_url);
        }
        Ok(cars
            .into_iter()
            .map(|car| CarDetail {
                accessories: accessories.remove(&car.id).unwrap_or_default(),
                images: images.remove(&car.id).unwrap_or_default(),
                car: car.into(),
            })
            .collect())
    }
}
