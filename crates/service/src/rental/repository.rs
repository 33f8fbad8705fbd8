use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::FieldCipher;
use models::{car, rental_request};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::warn;
use uuid::Uuid;

use super::domain::{RentalDraft, RentalRequest, RentalStatus};
use crate::errors::ServiceError;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<RentalRequest>, ServiceError>;
    async fn list_by_status(&self, status: RentalStatus) -> Result<Vec<RentalRequest>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<RentalRequest>, ServiceError>;
    async fn insert(&self, draft: RentalDraft) -> Result<RentalRequest, ServiceError>;
    /// Persist customer fields and the pickup/drop window of an existing request.
    async fn save_details(&self, req: &RentalRequest) -> Result<RentalRequest, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn find_car(&self, car_id: Uuid) -> Result<Option<car::Model>, ServiceError>;
    /// Atomically move a PENDING request to APPROVED and take the car out of
    /// availability. Fails with `Conflict` when either precondition no longer holds.
    async fn approve(&self, id: Uuid, car_id: Uuid, car_model: Option<String>) -> Result<RentalRequest, ServiceError>;
    /// Move a PENDING request to REJECTED; `Conflict` when it is no longer pending.
    async fn reject(&self, id: Uuid, reason: &str) -> Result<RentalRequest, ServiceError>;
}

/// SeaORM repository that seals customer PII on write and opens it on read.
pub struct SeaOrmRentalRepository {
    pub db: DatabaseConnection,
    pub cipher: Arc<FieldCipher>,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection, cipher: Arc<FieldCipher>) -> Self { Self { db, cipher } }

    fn open(&self, row: rental_request::Model) -> Result<RentalRequest, ServiceError> {
        let status = row.status.parse::<RentalStatus>().map_err(|_| {
            warn!(id = %row.id, status = %row.status, "stored rental status is not recognised");
            ServiceError::Db(format!("invalid status '{}' on rental request {}", row.status, row.id))
        })?;
        Ok(RentalRequest {
            id: row.id,
            customer_name: self.cipher.decrypt(&row.customer_name),
            phone_number: self.cipher.decrypt(&row.phone_number),
            email: self.cipher.decrypt(&row.email),
            car_model: row.car_model,
            pickup_date_time: row.pickup_date_time,
            drop_date_time: row.drop_date_time,
            status,
            rejection_reason: row.rejection_reason,
            created_at: row.created_at.with_timezone(&Utc),
            updated_at: row.updated_at.with_timezone(&Utc),
        })
    }

    fn open_all(&self, rows: Vec<rental_request::Model>) -> Result<Vec<RentalRequest>, ServiceError> {
        rows.into_iter().map(|r| self.open(r)).collect()
    }

    async fn reload(&self, id: Uuid) -> Result<RentalRequest, ServiceError> {
        let row = rental_request::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Rental request", id))?;
        self.open(row)
    }
}

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn list(&self) -> Result<Vec<RentalRequest>, ServiceError> {
        let rows = rental_request::Entity::find()
            .order_by_asc(rental_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.open_all(rows)
    }

    async fn list_by_status(&self, status: RentalStatus) -> Result<Vec<RentalRequest>, ServiceError> {
        let rows = rental_request::Entity::find()
            .filter(rental_request::Column::Status.eq(status.as_str()))
            .order_by_asc(rental_request::Column::CreatedAt)
            .all(&self.db)
            .await?;
        self.open_all(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<RentalRequest>, ServiceError> {
        let row = rental_request::Entity::find_by_id(id).one(&self.db).await?;
        row.map(|r| self.open(r)).transpose()
    }

    async fn insert(&self, draft: RentalDraft) -> Result<RentalRequest, ServiceError> {
        let now = Utc::now().into();
        let am = rental_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_name: Set(self.cipher.encrypt(&draft.customer_name)?),
            phone_number: Set(self.cipher.encrypt(&draft.phone_number)?),
            email: Set(self.cipher.encrypt(&draft.email)?),
            car_model: Set(draft.car_model),
            pickup_date_time: Set(draft.pickup_date_time),
            drop_date_time: Set(draft.drop_date_time),
            status: Set(RentalStatus::Pending.as_str().to_string()),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = am.insert(&self.db).await?;
        self.open(row)
    }

    async fn save_details(&self, req: &RentalRequest) -> Result<RentalRequest, ServiceError> {
        let am = rental_request::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(req.id),
            customer_name: Set(self.cipher.encrypt(&req.customer_name)?),
            phone_number: Set(self.cipher.encrypt(&req.phone_number)?),
            email: Set(self.cipher.encrypt(&req.email)?),
            car_model: Set(req.car_model.clone()),
            pickup_date_time: Set(req.pickup_date_time),
            drop_date_time: Set(req.drop_date_time),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let row = am.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => ServiceError::not_found("Rental request", req.id),
            other => ServiceError::Db(other.to_string()),
        })?;
        self.open(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = rental_request::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn find_car(&self, car_id: Uuid) -> Result<Option<car::Model>, ServiceError> {
        Ok(car::Entity::find_by_id(car_id).one(&self.db).await?)
    }

    async fn approve(&self, id: Uuid, car_id: Uuid, car_model: Option<String>) -> Result<RentalRequest, ServiceError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let txn = self.db.begin().await?;

        let flipped = car::Entity::update_many()
            .col_expr(car::Column::Available, Expr::value(false))
            .col_expr(car::Column::UpdatedAt, Expr::value(now))
            .filter(car::Column::Id.eq(car_id))
            .filter(car::Column::Available.eq(true))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::conflict(format!("Car is not available: {}", car_id)));
        }

        let mut update = rental_request::Entity::update_many()
            .col_expr(rental_request::Column::Status, Expr::value(RentalStatus::Approved.as_str()))
            .col_expr(rental_request::Column::UpdatedAt, Expr::value(now));
        if let Some(label) = car_model {
            update = update.col_expr(rental_request::Column::CarModel, Expr::value(label));
        }
        let approved = update
            .filter(rental_request::Column::Id.eq(id))
            .filter(rental_request::Column::Status.eq(RentalStatus::Pending.as_str()))
            .exec(&txn)
            .await?;
        if approved.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ServiceError::conflict(format!("Rental request is no longer pending: {}", id)));
        }

        txn.commit().await?;
        self.reload(id).await
    }

    async fn reject(&self, id: Uuid, reason: &str) -> Result<RentalRequest, ServiceError> {
        let res = rental_request::Entity::update_many()
            .col_expr(rental_request::Column::Status, Expr::value(RentalStatus::Rejected.as_str()))
            .col_expr(rental_request::Column::RejectionReason, Expr::value(reason))
            .col_expr(rental_request::Column::UpdatedAt, Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())))
            .filter(rental_request::Column::Id.eq(id))
            .filter(rental_request::Column::Status.eq(RentalStatus::Pending.as_str()))
            .exec(&self.db)
            .await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::conflict(format!("Rental request is no longer pending: {}", id)));
        }
        self.reload(id).await
    }
}
