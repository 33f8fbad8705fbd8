use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::rental_request::CAR_MODEL_MAX_LEN;

/// Placeholder daily rate used for the submission quote.
pub const FLAT_DAILY_RATE: f64 = 100.0;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    Pending,
    Approved,
    Rejected,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pending => "PENDING",
            RentalStatus::Approved => "APPROVED",
            RentalStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RentalStatus::Pending)
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(RentalStatus::Pending),
            "APPROVED" => Ok(RentalStatus::Approved),
            "REJECTED" => Ok(RentalStatus::Rejected),
            other => Err(ServiceError::invalid(format!("unknown rental status: {}", other))),
        }
    }
}

/// Rental request with customer fields in plaintext.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    pub id: Uuid,
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub car_model: Option<String>,
    pub pickup_date_time: NaiveDateTime,
    pub drop_date_time: NaiveDateTime,
    pub status: RentalStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public submission payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentalRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    pub car_model: Option<String>,
    pub pickup_date_time: Option<NaiveDateTime>,
    pub drop_date_time: Option<NaiveDateTime>,
}

/// Validated, normalized submission ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDraft {
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub car_model: Option<String>,
    pub pickup_date_time: NaiveDateTime,
    pub drop_date_time: NaiveDateTime,
}

/// Partial edit; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalUpdate {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub car_model: Option<String>,
    pub pickup_date_time: Option<NaiveDateTime>,
    pub drop_date_time: Option<NaiveDateTime>,
}

/// Submission receipt with the quoted duration and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalSubmission {
    pub id: Uuid,
    pub customer_name: String,
    pub status: RentalStatus,
    pub rental_days: i64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalFilter {
    pub customer: Option<String>,
    pub status: Option<String>,
}

/// Whole days between pickup and drop, never less than one.
pub fn rental_days(pickup: NaiveDateTime, drop: NaiveDateTime) -> i64 {
    (drop - pickup).num_days().max(1)
}

fn required(value: &str, field: &str) -> Result<String, ServiceError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ServiceError::invalid(format!("{} is required", field)));
    }
    Ok(v.to_string())
}

pub(crate) fn normalize_email(value: &str) -> Result<String, ServiceError> {
    let email = required(value, "email")?.to_lowercase();
    if !EMAIL_REGEX.is_match(&email) {
        return Err(ServiceError::invalid("email format is invalid"));
    }
    Ok(email)
}

pub(crate) fn normalize_label(value: Option<&str>) -> Result<Option<String>, ServiceError> {
    let label = value.map(str::trim).filter(|s| !s.is_empty());
    if let Some(l) = label {
        if l.chars().count() > CAR_MODEL_MAX_LEN {
            return Err(ServiceError::invalid(format!(
                "carModel must be at most {} characters",
                CAR_MODEL_MAX_LEN
            )));
        }
    }
    Ok(label.map(str::to_string))
}

pub(crate) fn check_window(pickup: NaiveDateTime, drop: NaiveDateTime) -> Result<(), ServiceError> {
    if pickup > drop {
        return Err(ServiceError::invalid("pickupDateTime must not be after dropDateTime"));
    }
    Ok(())
}

impl NewRentalRequest {
    /// Validate in field order and normalize; `now` is the UTC wall clock.
    pub fn validate(&self, now: NaiveDateTime) -> Result<RentalDraft, ServiceError> {
        let customer_name = required(&self.customer_name, "customerName")?;
        let phone_number = required(&self.phone_number, "phoneNumber")?;
        let email = normalize_email(&self.email)?;
        let pickup = self
            .pickup_date_time
            .ok_or_else(|| ServiceError::invalid("pickupDateTime is required"))?;
        let drop = self
            .drop_date_time
            .ok_or_else(|| ServiceError::invalid("dropDateTime is required"))?;
        check_window(pickup, drop)?;
        if pickup < now {
            return Err(ServiceError::invalid("pickupDateTime must not be in the past"));
        }
        Ok(RentalDraft {
            customer_name,
            phone_number,
            email,
            car_model: normalize_label(self.car_model.as_deref())?,
            pickup_date_time: pickup,
            drop_date_time: drop,
        })
    }
}

impl RentalUpdate {
    /// Apply provided fields onto `req`, normalized like a submission.
    pub fn apply_to(&self, req: &mut RentalRequest) -> Result<(), ServiceError> {
        if let Some(name) = &self.customer_name {
            req.customer_name = required(name, "customerName")?;
        }
        if let Some(phone) = &self.phone_number {
            req.phone_number = required(phone, "phoneNumber")?;
        }
        if let Some(email) = &self.email {
            req.email = normalize_email(email)?;
        }
        if let Some(label) = &self.car_model {
            req.car_model = normalize_label(Some(label))?;
        }
        if let Some(p) = self.pickup_date_time {
            req.pickup_date_time = p;
        }
        if let Some(d) = self.drop_date_time {
            req.drop_date_time = d;
        }
        check_window(req.pickup_date_time, req.drop_date_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn submission() -> NewRentalRequest {
        NewRentalRequest {
            customer_name: "  Jane Doe ".into(),
            phone_number: " 0771234567".into(),
            email: " Jane.Doe@Example.COM ".into(),
            car_model: Some("  ".into()),
            pickup_date_time: Some(at(10, 9)),
            drop_date_time: Some(at(13, 9)),
        }
    }

    fn message(e: ServiceError) -> String {
        match e {
            ServiceError::InvalidInput(m) => m,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn validate_normalizes_fields() {
        let draft = submission().validate(at(1, 0)).unwrap();
        assert_eq!(draft.customer_name, "Jane Doe");
        assert_eq!(draft.phone_number, "0771234567");
        assert_eq!(draft.email, "jane.doe@example.com");
        assert_eq!(draft.car_model, None);
    }

    #[test]
    fn validate_names_first_offending_field() {
        let now = at(1, 0);
        let mut s = submission();
        s.customer_name = " ".into();
        s.email = String::new();
        assert!(message(s.validate(now).unwrap_err()).contains("customerName"));

        let mut s = submission();
        s.phone_number = String::new();
        assert!(message(s.validate(now).unwrap_err()).contains("phoneNumber"));

        let mut s = submission();
        s.email = "no-at-sign".into();
        assert!(message(s.validate(now).unwrap_err()).contains("email"));

        let mut s = submission();
        s.drop_date_time = Some(at(9, 9));
        assert!(message(s.validate(now).unwrap_err()).contains("after"));

        let mut s = submission();
        s.pickup_date_time = None;
        assert!(message(s.validate(now).unwrap_err()).contains("pickupDateTime"));
    }

    #[test]
    fn pickup_in_the_past_is_rejected_but_now_is_fine() {
        let s = submission();
        let pickup = s.pickup_date_time.unwrap();
        assert!(message(s.validate(pickup + Duration::seconds(1)).unwrap_err()).contains("past"));
        assert!(s.validate(pickup).is_ok());
    }

    #[test]
    fn car_model_longer_than_column_is_invalid() {
        let now = at(1, 0);
        let mut s = submission();
        s.car_model = Some("x".repeat(CAR_MODEL_MAX_LEN));
        assert_eq!(s.validate(now).unwrap().car_model.map(|m| m.len()), Some(CAR_MODEL_MAX_LEN));

        s.car_model = Some("x".repeat(CAR_MODEL_MAX_LEN + 1));
        assert!(message(s.validate(now).unwrap_err()).contains("carModel"));

        let req_draft = submission().validate(now).unwrap();
        let patch = RentalUpdate { car_model: Some("y".repeat(CAR_MODEL_MAX_LEN + 1)), ..RentalUpdate::default() };
        let mut req = RentalRequest {
            id: Uuid::new_v4(),
            customer_name: req_draft.customer_name,
            phone_number: req_draft.phone_number,
            email: req_draft.email,
            car_model: None,
            pickup_date_time: req_draft.pickup_date_time,
            drop_date_time: req_draft.drop_date_time,
            status: RentalStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(message(patch.apply_to(&mut req).unwrap_err()).contains("carModel"));
        assert_eq!(req.car_model, None);
    }

    #[test]
    fn rental_days_rounds_down_with_floor_of_one() {
        assert_eq!(rental_days(at(10, 9), at(10, 9)), 1);
        assert_eq!(rental_days(at(10, 9), at(10, 20)), 1);
        assert_eq!(rental_days(at(10, 9), at(13, 9)), 3);
        assert_eq!(rental_days(at(10, 9), at(13, 8)), 2);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("pending".parse::<RentalStatus>().unwrap(), RentalStatus::Pending);
        assert_eq!("APPROVED".parse::<RentalStatus>().unwrap(), RentalStatus::Approved);
        assert!("CANCELLED".parse::<RentalStatus>().is_err());
        assert!(RentalStatus::Rejected.is_terminal());
        assert_eq!(serde_json::to_string(&RentalStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn update_applies_only_given_fields() {
        let draft = submission().validate(at(1, 0)).unwrap();
        let mut req = RentalRequest {
            id: Uuid::new_v4(),
            customer_name: draft.customer_name,
            phone_number: draft.phone_number,
            email: draft.email,
            car_model: Some("Toyota Prius".into()),
            pickup_date_time: draft.pickup_date_time,
            drop_date_time: draft.drop_date_time,
            status: RentalStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let patch = RentalUpdate { email: Some(" NEW@Mail.com".into()), ..RentalUpdate::default() };
        patch.apply_to(&mut req).unwrap();
        assert_eq!(req.email, "new@mail.com");
        assert_eq!(req.customer_name, "Jane Doe");
        assert_eq!(req.car_model.as_deref(), Some("Toyota Prius"));

        let bad = RentalUpdate { drop_date_time: Some(at(2, 0)), ..RentalUpdate::default() };
        assert!(bad.apply_to(&mut req).is_err());
        let blank = RentalUpdate { phone_number: Some("  ".into()), ..RentalUpdate::default() };
        assert!(blank.apply_to(&mut req).is_err());
    }
}
