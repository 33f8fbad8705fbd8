use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{
    rental_days, NewRentalRequest, RentalFilter, RentalRequest, RentalStatus, RentalSubmission, RentalUpdate,
    FLAT_DAILY_RATE,
};
use super::repository::RentalRepository;
use crate::errors::ServiceError;
use models::rental_request::CAR_MODEL_MAX_LEN;

/// Rental request workflow. Customer fields are plaintext here; the
/// repository handles encryption at rest.
pub struct RentalService<R: RentalRepository> {
    repo: Arc<R>,
}

impl<R: RentalRepository> RentalService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Record a new request in PENDING and quote the flat-rate amount.
    #[instrument(skip(self, input))]
    pub async fn submit(&self, input: NewRentalRequest) -> Result<RentalSubmission, ServiceError> {
        let draft = input.validate(Utc::now().naive_utc())?;
        let days = rental_days(draft.pickup_date_time, draft.drop_date_time);
        let created = self.repo.insert(draft).await?;
        info!(request_id = %created.id, rental_days = days, "rental_request_submitted");
        Ok(RentalSubmission {
            id: created.id,
            customer_name: created.customer_name,
            status: created.status,
            rental_days: days,
            total_amount: days as f64 * FLAT_DAILY_RATE,
        })
    }

    pub async fn list(&self) -> Result<Vec<RentalRequest>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<RentalRequest, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("Rental request", id))
    }

    /// Case-insensitive substring match on the decrypted customer name.
    pub async fn by_customer(&self, name: &str) -> Result<Vec<RentalRequest>, ServiceError> {
        let needle = name.trim().to_lowercase();
        let all = self.repo.list().await?;
        Ok(all.into_iter().filter(|r| r.customer_name.to_lowercase().contains(&needle)).collect())
    }

    pub async fn by_status(&self, status: &str) -> Result<Vec<RentalRequest>, ServiceError> {
        self.repo.list_by_status(status.parse()?).await
    }

    pub async fn pending(&self) -> Result<Vec<RentalRequest>, ServiceError> {
        self.repo.list_by_status(RentalStatus::Pending).await
    }

    /// Listing with optional customer and status filters combined.
    pub async fn search(&self, filter: &RentalFilter) -> Result<Vec<RentalRequest>, ServiceError> {
        let status = match filter.status.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(s) => Some(s.parse::<RentalStatus>()?),
            None => None,
        };
        let mut rows = match status {
            Some(s) => self.repo.list_by_status(s).await?,
            None => self.repo.list().await?,
        };
        if let Some(customer) = filter.customer.as_deref().filter(|s| !s.trim().is_empty()) {
            let needle = customer.trim().to_lowercase();
            rows.retain(|r| r.customer_name.to_lowercase().contains(&needle));
        }
        Ok(rows)
    }

    /// Approve a pending request against an available car; the car becomes
    /// unavailable in the same transaction.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: Uuid, car_id: Uuid) -> Result<RentalRequest, ServiceError> {
        let request = self.get(id).await?;
        let car = self
            .repo
            .find_car(car_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Car", car_id))?;
        if request.status != RentalStatus::Pending {
            return Err(ServiceError::conflict(format!(
                "Rental request {} is already {}",
                id, request.status
            )));
        }
        if !car.available {
            return Err(ServiceError::conflict(format!("Car is not available: {}", car_id)));
        }
        let backfill = match request.car_model.as_deref() {
            Some(label) if !label.trim().is_empty() => None,
            _ => Some(car.label().chars().take(CAR_MODEL_MAX_LEN).collect()),
        };
        let approved = self.repo.approve(id, car_id, backfill).await?;
        info!(request_id = %id, car_id = %car_id, "rental_request_approved");
        Ok(approved)
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<RentalRequest, ServiceError> {
        let request = self.get(id).await?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ServiceError::invalid("reason is required"));
        }
        if request.status != RentalStatus::Pending {
            return Err(ServiceError::conflict(format!(
                "Rental request {} is already {}",
                id, request.status
            )));
        }
        let rejected = self.repo.reject(id, reason).await?;
        info!(request_id = %id, "rental_request_rejected");
        Ok(rejected)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: RentalUpdate) -> Result<RentalRequest, ServiceError> {
        let mut request = self.get(id).await?;
        patch.apply_to(&mut request)?;
        let saved = self.repo.save_details(&request).await?;
        info!(request_id = %id, "rental_request_updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Rental request", id));
        }
        info!(request_id = %id, "rental_request_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::car::{domain::CarInput, repository::SeaOrmCarRepository, CarService};
    use crate::rental::repository::SeaOrmRentalRepository;
    use crate::test_support::{cipher, get_db};
    use chrono::{Duration, NaiveDateTime};
    use models::rental_request;
    use sea_orm::{DatabaseConnection, EntityTrait};

    struct Fixture {
        db: DatabaseConnection,
        cars: CarService<SeaOrmCarRepository>,
        rentals: RentalService<SeaOrmRentalRepository>,
    }

    async fn fixture() -> Result<Fixture, anyhow::Error> {
        let db = get_db().await?;
        Ok(Fixture {
            db: db.clone(),
            cars: CarService::new(Arc::new(SeaOrmCarRepository { db: db.clone() })),
            rentals: RentalService::new(Arc::new(SeaOrmRentalRepository::new(db, cipher()))),
        })
    }

    fn days_from_now(days: i64) -> NaiveDateTime {
        (Utc::now() + Duration::days(days)).naive_utc()
    }

    fn new_request(name: &str, car_model: Option<&str>) -> NewRentalRequest {
        NewRentalRequest {
            customer_name: name.into(),
            phone_number: "0771234567".into(),
            email: format!("{}@Example.com", name.trim().replace(' ', ".")),
            car_model: car_model.map(str::to_string),
            pickup_date_time: Some(days_from_now(1)),
            drop_date_time: Some(days_from_now(4)),
        }
    }

    async fn add_car(f: &Fixture) -> Result<Uuid, anyhow::Error> {
        let car = f
            .cars
            .create(CarInput { brand: "Toyota".into(), model: "Prius".into(), ..CarInput::default() })
            .await?;
        Ok(car.id)
    }

    #[tokio::test]
    async fn submit_quotes_flat_rate_and_starts_pending() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let receipt = f.rentals.submit(new_request(" Jane Doe ", None)).await?;
        assert_eq!(receipt.status, RentalStatus::Pending);
        assert_eq!(receipt.customer_name, "Jane Doe");
        assert_eq!(receipt.rental_days, 3);
        assert_eq!(receipt.total_amount, 300.0);

        let stored = f.rentals.get(receipt.id).await?;
        assert_eq!(stored.email, "jane.doe@example.com");

        let mut past = new_request("Late", None);
        past.pickup_date_time = Some(days_from_now(-1));
        assert!(matches!(f.rentals.submit(past).await, Err(ServiceError::InvalidInput(_))));
        Ok(())
    }

    #[tokio::test]
    async fn customer_fields_are_encrypted_at_rest() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let receipt = f.rentals.submit(new_request("Jane Doe", None)).await?;
        let row = rental_request::Entity::find_by_id(receipt.id).one(&f.db).await?.unwrap();
        assert_ne!(row.customer_name, "Jane Doe");
        assert!(row.customer_name.starts_with(common::crypto::CIPHER_PREFIX));
        assert!(!row.email.contains("example.com"));
        assert_eq!(row.status, "PENDING");
        Ok(())
    }

    #[tokio::test]
    async fn approve_flips_car_and_backfills_blank_model() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let car_id = add_car(&f).await?;
        let r = f.rentals.submit(new_request("Jane Doe", None)).await?;

        let approved = f.rentals.approve(r.id, car_id).await?;
        assert_eq!(approved.status, RentalStatus::Approved);
        assert_eq!(approved.car_model.as_deref(), Some("Toyota Prius"));
        assert_eq!(approved.customer_name, "Jane Doe");
        assert!(!f.cars.get(car_id).await?.car.available);

        // second request for the same car now conflicts and stays pending
        let other = f.rentals.submit(new_request("John Roe", None)).await?;
        assert!(matches!(f.rentals.approve(other.id, car_id).await, Err(ServiceError::Conflict(_))));
        assert_eq!(f.rentals.get(other.id).await?.status, RentalStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn approve_keeps_customer_supplied_model() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let car_id = add_car(&f).await?;
        let r = f.rentals.submit(new_request("Jane Doe", Some("Any hybrid"))).await?;
        let approved = f.rentals.approve(r.id, car_id).await?;
        assert_eq!(approved.car_model.as_deref(), Some("Any hybrid"));
        Ok(())
    }

    #[tokio::test]
    async fn backfilled_label_fits_the_car_model_column() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let brand = "B".repeat(models::car::NAME_MAX_LEN);
        let model = "M".repeat(models::car::NAME_MAX_LEN);
        let car = f.cars.create(CarInput { brand: brand.clone(), model, ..CarInput::default() }).await?;
        let r = f.rentals.submit(new_request("Jane Doe", None)).await?;

        let approved = f.rentals.approve(r.id, car.id).await?;
        let label = approved.car_model.unwrap_or_default();
        assert_eq!(label.chars().count(), CAR_MODEL_MAX_LEN);
        assert!(label.starts_with(&format!("{} M", brand)));
        Ok(())
    }

    #[tokio::test]
    async fn approve_reports_missing_entities() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let car_id = add_car(&f).await?;
        let r = f.rentals.submit(new_request("Jane Doe", None)).await?;
        assert!(matches!(f.rentals.approve(Uuid::new_v4(), car_id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.rentals.approve(r.id, Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        assert!(f.cars.get(car_id).await?.car.available);
        Ok(())
    }

    #[tokio::test]
    async fn reject_looks_up_the_request_before_the_reason() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let r = f.rentals.submit(new_request("Jane Doe", None)).await?;
        assert!(matches!(f.rentals.reject(Uuid::new_v4(), "").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.rentals.reject(r.id, "   ").await, Err(ServiceError::InvalidInput(_))));
        assert_eq!(f.rentals.get(r.id).await?.status, RentalStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn terminal_states_stay_terminal() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let car_id = add_car(&f).await?;
        let spare = add_car(&f).await?;
        let a = f.rentals.submit(new_request("Jane Doe", None)).await?;
        let b = f.rentals.submit(new_request("John Roe", None)).await?;

        f.rentals.approve(a.id, car_id).await?;
        assert!(matches!(f.rentals.reject(a.id, "changed mind").await, Err(ServiceError::Conflict(_))));

        let rejected = f.rentals.reject(b.id, "  no licence ").await?;
        assert_eq!(rejected.status, RentalStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("no licence"));
        assert_eq!(rejected.customer_name, "John Roe");
        assert!(matches!(f.rentals.approve(b.id, spare).await, Err(ServiceError::Conflict(_))));
        assert!(f.cars.get(spare).await?.car.available);

        assert!(matches!(f.rentals.reject(b.id, " ").await, Err(ServiceError::InvalidInput(_))));
        assert!(matches!(f.rentals.reject(Uuid::new_v4(), "x").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn filters_match_decrypted_names_and_status() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let car_id = add_car(&f).await?;
        let a = f.rentals.submit(new_request("Jane Doe", None)).await?;
        f.rentals.submit(new_request("Janet Smith", None)).await?;
        f.rentals.submit(new_request("Bob Stone", None)).await?;
        f.rentals.approve(a.id, car_id).await?;

        assert_eq!(f.rentals.by_customer("JANE").await?.len(), 2);
        assert_eq!(f.rentals.by_customer("stone").await?.len(), 1);
        assert_eq!(f.rentals.pending().await?.len(), 2);
        assert_eq!(f.rentals.by_status("APPROVED").await?.len(), 1);
        assert!(matches!(f.rentals.by_status("LOST").await, Err(ServiceError::InvalidInput(_))));

        let filter = RentalFilter { customer: Some("jan".into()), status: Some("PENDING".into()) };
        let hits = f.rentals.search(&filter).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Janet Smith");
        assert_eq!(f.rentals.list().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete() -> Result<(), anyhow::Error> {
        let f = fixture().await?;
        let r = f.rentals.submit(new_request("Jane Doe", None)).await?;
        let patch = RentalUpdate {
            email: Some(" JD@Mail.COM ".into()),
            car_model: Some(" Honda Fit ".into()),
            ..RentalUpdate::default()
        };
        let updated = f.rentals.update(r.id, patch).await?;
        assert_eq!(updated.email, "jd@mail.com");
        assert_eq!(updated.car_model.as_deref(), Some("Honda Fit"));
        assert_eq!(updated.customer_name, "Jane Doe");
        assert_eq!(updated.status, RentalStatus::Pending);

        let bad = RentalUpdate { email: Some("nope".into()), ..RentalUpdate::default() };
        assert!(matches!(f.rentals.update(r.id, bad).await, Err(ServiceError::InvalidInput(_))));
        assert!(matches!(
            f.rentals.update(Uuid::new_v4(), RentalUpdate::default()).await,
            Err(ServiceError::NotFound(_))
        ));

        f.rentals.delete(r.id).await?;
        assert!(matches!(f.rentals.get(r.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.rentals.delete(r.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
