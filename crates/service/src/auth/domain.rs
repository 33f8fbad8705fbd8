use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain user (business view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

impl AuthUser {
    /// Authority string carried in tokens, e.g. `ROLE_ADMIN`.
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.role)
    }
}

/// Successful login: signed token plus who it was issued to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub username: String,
    pub authorities: Vec<String>,
}

/// Identity resolved from a bearer token for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub authorities: Vec<String>,
}

impl Principal {
    /// `role` is the bare role name (`ADMIN`); authorities carry the `ROLE_` prefix.
    pub fn has_role(&self, role: &str) -> bool {
        self.authorities
            .iter()
            .any(|a| a.strip_prefix("ROLE_").unwrap_or(a) == role)
    }

    pub fn is_admin(&self) -> bool { self.has_role(models::user::ROLE_ADMIN) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_checks_strip_prefix() {
        let p = Principal { username: "a".into(), authorities: vec!["ROLE_ADMIN".into()] };
        assert!(p.is_admin());
        assert!(p.has_role("ADMIN"));
        assert!(!p.has_role("USER"));
        let u = Principal { username: "b".into(), authorities: vec!["ROLE_USER".into()] };
        assert!(!u.is_admin());
    }
}
