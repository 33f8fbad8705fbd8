use std::sync::Arc;

use common::FieldCipher;
use sea_orm::DatabaseConnection;
use service::accessory::{repository::SeaOrmAccessoryRepository, AccessoryService};
use service::auth::{repo::seaorm::SeaOrmAuthRepository, AuthService, TokenService};
use service::car::{repository::SeaOrmCarRepository, CarService};
use service::rental::{repository::SeaOrmRentalRepository, RentalService};

/// Shared handler state: one service per aggregate over a pooled connection.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub tokens: TokenService,
    pub cars: Arc<CarService<SeaOrmCarRepository>>,
    pub accessories: Arc<AccessoryService<SeaOrmAccessoryRepository>>,
    pub rentals: Arc<RentalService<SeaOrmRentalRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, cipher: Arc<FieldCipher>, tokens: TokenService) -> Self {
        let auth_repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        Self {
            auth: Arc::new(AuthService::new(auth_repo, tokens.clone())),
            tokens,
            cars: Arc::new(CarService::new(Arc::new(SeaOrmCarRepository { db: db.clone() }))),
            accessories: Arc::new(AccessoryService::new(Arc::new(SeaOrmAccessoryRepository { db: db.clone() }))),
            rentals: Arc::new(RentalService::new(Arc::new(SeaOrmRentalRepository::new(db, cipher)))),
        }
    }
}
