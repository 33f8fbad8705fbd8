use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    async fn find(&self, username: &str) -> Result<Option<models::user::Model>, AuthError> {
        models::user::Entity::find()
            .filter(models::user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = self.find(username).await?;
        Ok(res.map(|u| AuthUser { id: u.id, username: u.username, role: u.role }))
    }

    async fn get_password_hash(&self, username: &str) -> Result<Option<String>, AuthError> {
        Ok(self.find(username).await?.map(|u| u.password_hash))
    }

    async fn create_user(&self, username: &str, password_hash: String, role: &str) -> Result<AuthUser, AuthError> {
        models::user::validate_username(username)?;
        models::user::validate_role(role)?;
        let am = models::user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username.trim().to_string()),
            password_hash: Set(password_hash),
            role: Set(role.to_string()),
            created_at: Set(Utc::now().into()),
        };
        let created = am.insert(&self.db).await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(AuthUser { id: created.id, username: created.username, role: created.role })
    }
}
