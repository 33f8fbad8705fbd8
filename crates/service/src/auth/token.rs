//! HS256 bearer tokens.
//!
//! Claims are `sub` (username), `authorities` (`ROLE_*` strings), `iat` and
//! `exp`. Every verification failure collapses to `false`/`None`; callers
//! cannot tell a bad signature from an expired token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::Principal;
use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub authorities: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").field("ttl", &self.ttl).finish()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(&cfg.jwt_secret, cfg.token_ttl_hours)
    }

    /// Sign a token for `username` valid from now until now + ttl.
    pub fn issue(&self, username: &str, authorities: Vec<String>) -> Result<String, AuthError> {
        self.issue_at(username, authorities, Utc::now())
    }

    fn issue_at(&self, username: &str, authorities: Vec<String>, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            sub: username.to_string(),
            authorities,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    fn claims(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(error = %e, "token rejected");
                None
            }
        }
    }

    /// Subject of a valid token.
    pub fn extract_username(&self, token: &str) -> Option<String> {
        self.claims(token).map(|c| c.sub)
    }

    /// True when the signature verifies, the token is unexpired and its
    /// subject equals `expected_username`.
    pub fn validate(&self, token: &str, expected_username: &str) -> bool {
        self.claims(token).map(|c| c.sub == expected_username).unwrap_or(false)
    }

    pub fn resolve(&self, token: &str) -> Option<Principal> {
        self.claims(token).map(|c| Principal { username: c.sub, authorities: c.authorities })
    }
}
