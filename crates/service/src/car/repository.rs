use async_trait::async_trait;
use chrono::Utc;
use models::{accessory, car, car_image};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::domain::{trimmed, CarFilter, CarInput};
use crate::errors::ServiceError;

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<car::Model>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<car::Model>, ServiceError>;
    async fn create(&self, input: &CarInput) -> Result<car::Model, ServiceError>;
    async fn update(&self, id: Uuid, input: &CarInput) -> Result<Option<car::Model>, ServiceError>;
    /// Removes the car with its accessories and images; false when absent.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    /// Accessories of all given cars, ordered by name.
    async fn accessories_of(&self, car_ids: &[Uuid]) -> Result<Vec<accessory::Model>, ServiceError>;
    /// Images of all given cars, oldest first.
    async fn images_of(&self, car_ids: &[Uuid]) -> Result<Vec<car_image::Model>, ServiceError>;
    async fn images(&self, car_id: Uuid) -> Result<Vec<car_image::Model>, ServiceError>;
    async fn add_image(&self, car_id: Uuid, url: &str) -> Result<car_image::Model, ServiceError>;
    async fn delete_image(&self, car_id: Uuid, image_id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCarRepository {
    pub db: DatabaseConnection,
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn contains_ci(col: car::Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.trim().to_lowercase()));
    Expr::expr(Func::lower(Expr::col((car::Entity, col)))).like(LikeExpr::new(pattern).escape('\\'))
}

fn apply(am: &mut car::ActiveModel, input: &CarInput) {
    am.brand = Set(input.brand.trim().to_string());
    am.model = Set(input.model.trim().to_string());
    am.fuel = Set(trimmed(&input.fuel));
    am.car_type = Set(trimmed(&input.car_type));
    am.plate_number = Set(trimmed(&input.plate_number));
    am.main_location = Set(trimmed(&input.main_location));
    am.color = Set(trimmed(&input.color));
    am.transmission = Set(trimmed(&input.transmission));
    am.year = Set(input.year);
    am.passengers = Set(input.passengers);
    am.no_of_air_bags = Set(input.no_of_air_bags);
    am.description = Set(input.description.clone());
    am.daily_price = Set(input.daily_price);
    am.weekly_price = Set(input.weekly_price);
    am.monthly_price = Set(input.monthly_price);
    am.updated_at = Set(Utc::now().into());
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn list(&self, filter: &CarFilter) -> Result<Vec<car::Model>, ServiceError> {
        let mut q = car::Entity::find();
        if let Some(loc) = filter.location.as_deref().filter(|s| !s.trim().is_empty()) {
            q = q.filter(contains_ci(car::Column::MainLocation, loc));
        }
        if let Some(brand) = filter.brand.as_deref().filter(|s| !s.trim().is_empty()) {
            q = q.filter(contains_ci(car::Column::Brand, brand));
        }
        if let Some(t) = filter.car_type.as_deref().filter(|s| !s.trim().is_empty()) {
            q = q.filter(contains_ci(car::Column::CarType, t));
        }
        if filter.available == Some(true) {
            q = q.filter(car::Column::Available.eq(true));
        }
        Ok(q.order_by_asc(car::Column::CreatedAt).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<car::Model>, ServiceError> {
        Ok(car::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, input: &CarInput) -> Result<car::Model, ServiceError> {
        let now = Utc::now().into();
        let mut am = car::ActiveModel {
            id: Set(Uuid::new_v4()),
            available: Set(input.available.unwrap_or(true)),
            created_at: Set(now),
            ..Default::default()
        };
        apply(&mut am, input);
        Ok(am.insert(&self.db).await?)
    }

    async fn update(&self, id: Uuid, input: &CarInput) -> Result<Option<car::Model>, ServiceError> {
        let Some(found) = car::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: car::ActiveModel = found.into();
        apply(&mut am, input);
        if let Some(available) = input.available {
            am.available = Set(available);
        }
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(found) = car::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };
        accessory::Entity::delete_many()
            .filter(accessory::Column::CarId.eq(id))
            .exec(&txn)
            .await?;
        car_image::Entity::delete_many()
            .filter(car_image::Column::CarId.eq(id))
            .exec(&txn)
            .await?;
        found.delete(&txn).await?;
        txn.commit().await?;
        Ok(true)
    }

    async fn accessories_of(&self, car_ids: &[Uuid]) -> Result<Vec<accessory::Model>, ServiceError> {
        if car_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(accessory::Entity::find()
            .filter(accessory::Column::CarId.is_in(car_ids.iter().copied()))
            .order_by_asc(accessory::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn images_of(&self, car_ids: &[Uuid]) -> Result<Vec<car_image::Model>, ServiceError> {
        if car_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(car_image::Entity::find()
            .filter(car_image::Column::CarId.is_in(car_ids.iter().copied()))
            .order_by_asc(car_image::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn images(&self, car_id: Uuid) -> Result<Vec<car_image::Model>, ServiceError> {
        Ok(car_image::Entity::find()
            .filter(car_image::Column::CarId.eq(car_id))
            .order_by_asc(car_image::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn add_image(&self, car_id: Uuid, url: &str) -> Result<car_image::Model, ServiceError> {
        let am = car_image::ActiveModel {
            id: Set(Uuid::new_v4()),
            car_id: Set(car_id),
            image_url: Set(url.trim().to_string()),
            created_at: Set(Utc::now().into()),
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn delete_image(&self, car_id: Uuid, image_id: Uuid) -> Result<bool, ServiceError> {
        let res = car_image::Entity::delete_many()
            .filter(car_image::Column::Id.eq(image_id))
            .filter(car_image::Column::CarId.eq(car_id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
