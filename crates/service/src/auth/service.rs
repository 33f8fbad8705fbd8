use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{AuthUser, LoginResult};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token::TokenService;

/// Hash verified when the username is unknown, so a miss costs the same
/// Argon2 work as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"not-a-real-password", &salt)
        .ok()
        .map(|h| h.to_string())
});

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenService) -> Self { Self { repo, tokens } }

    pub fn tokens(&self) -> &TokenService { &self.tokens }

    /// Create a user with an Argon2 password hash.
    #[instrument(skip(self, password))]
    pub async fn create_user(&self, username: &str, password: &str, role: &str) -> Result<AuthUser, AuthError> {
        if password.is_empty() {
            return Err(AuthError::Validation("password required".into()));
        }
        if self.repo.find_user_by_username(username).await?.is_some() {
            return Err(AuthError::Conflict);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        let user = self.repo.create_user(username, hash, role).await?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "user_created");
        Ok(user)
    }

    /// Create the admin account unless the username already exists.
    /// Returns whether a user was created.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if let Some(existing) = self.repo.find_user_by_username(username).await? {
            debug!(username = %existing.username, "admin bootstrap skipped; user exists");
            return Ok(false);
        }
        self.create_user(username, password, models::user::ROLE_ADMIN).await?;
        Ok(true)
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenService, repository::mock::MockAuthRepository};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), TokenService::new("secret", 10));
    /// tokio_test::block_on(svc.ensure_admin("admin", "Passw0rd")).unwrap();
    /// let res = tokio_test::block_on(svc.login("admin", "Passw0rd")).unwrap();
    /// assert_eq!(res.authorities, vec!["ROLE_ADMIN".to_string()]);
    /// assert!(svc.tokens().validate(&res.token, "admin"));
    /// ```
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self.repo.find_user_by_username(username).await?;
        let hash = match &user {
            Some(_) => self.repo.get_password_hash(username).await?,
            None => None,
        };
        let (user, hash) = match (user, hash) {
            (Some(user), Some(hash)) => (user, hash),
            _ => {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = verify_password(password, dummy);
                }
                debug!("login for unknown user");
                return Err(AuthError::InvalidCredentials);
            }
        };
        if !verify_password(password, &hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let authorities = vec![user.authority()];
        let token = self.tokens.issue(&user.username, authorities.clone())?;
        info!(username = %user.username, "login_succeeded");
        Ok(LoginResult { token, username: user.username, authorities })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::seaorm::SeaOrmAuthRepository;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::test_support::get_db;

    fn mock_svc() -> AuthService<MockAuthRepository> {
        AuthService::new(Arc::new(MockAuthRepository::default()), TokenService::new("unit-secret", 10))
    }

    #[test]
    fn unknown_user_path_verifies_a_real_argon2_hash() {
        let dummy = DUMMY_HASH.as_deref().expect("dummy hash");
        let salt = SaltString::generate(&mut OsRng);
        let real = Argon2::default().hash_password(b"pw", &salt).unwrap();
        let parsed = PasswordHash::new(dummy).unwrap();
        assert_eq!(parsed.algorithm, real.algorithm);
        assert_eq!(parsed.params, real.params);
        assert!(!verify_password("anything", dummy).unwrap());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let svc = mock_svc();
        svc.ensure_admin("admin", "right-pass").await.unwrap();
        let a = svc.login("admin", "wrong-pass").await.unwrap_err();
        let b = svc.login("nobody", "right-pass").await.unwrap_err();
        assert!(matches!(a, AuthError::InvalidCredentials));
        assert!(matches!(b, AuthError::InvalidCredentials));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let svc = mock_svc();
        assert!(svc.ensure_admin("admin", "first").await.unwrap());
        assert!(!svc.ensure_admin("admin", "second").await.unwrap());
        // original password still valid
        assert!(svc.login("admin", "first").await.is_ok());
        assert!(svc.login("admin", "second").await.is_err());
    }

    #[tokio::test]
    async fn seaorm_login_issues_role_authority() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = AuthService::new(Arc::new(SeaOrmAuthRepository { db }), TokenService::new("unit-secret", 10));
        svc.ensure_admin("admin", "admin-pass").await?;
        svc.create_user("clerk", "clerk-pass", models::user::ROLE_USER).await?;
        assert!(matches!(svc.create_user("clerk", "x", models::user::ROLE_USER).await, Err(AuthError::Conflict)));

        let admin = svc.login("admin", "admin-pass").await?;
        assert_eq!(admin.authorities, vec!["ROLE_ADMIN".to_string()]);
        let p = svc.tokens().resolve(&admin.token).unwrap();
        assert!(p.is_admin());

        let clerk = svc.login("clerk", "clerk-pass").await?;
        assert_eq!(clerk.authorities, vec!["ROLE_USER".to_string()]);
        Ok(())
    }
}
