use async_trait::async_trait;

use super::domain::AuthUser;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn get_password_hash(&self, username: &str) -> Result<Option<String>, AuthError>;
    async fn create_user(&self, username: &str, password_hash: String, role: &str) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, (AuthUser, String)>>, // key: username
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).map(|(u, _)| u.clone()))
        }

        async fn get_password_hash(&self, username: &str) -> Result<Option<String>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).map(|(_, h)| h.clone()))
        }

        async fn create_user(&self, username: &str, password_hash: String, role: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: uuid::Uuid::new_v4(), username: username.to_string(), role: role.to_string() };
            users.insert(username.to_string(), (user.clone(), password_hash));
            Ok(user)
        }
    }
}
