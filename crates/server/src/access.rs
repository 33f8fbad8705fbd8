//! Route/method access policy and the bearer-token middleware enforcing it.
//!
//! Rules are checked in order and the first match wins; anything unmatched
//! needs an authenticated principal. Patterns use `*` for exactly one path
//! segment and a trailing `**` for any remainder (including nothing).

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use models::user::ROLE_ADMIN;
use service::auth::Principal;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Role(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// `None` matches every method.
    pub method: Option<&'static str>,
    pub pattern: &'static str,
    pub access: Access,
}

const fn rule(method: Option<&'static str>, pattern: &'static str, access: Access) -> Rule {
    Rule { method, pattern, access }
}

const GET: Option<&str> = Some("GET");
const POST: Option<&str> = Some("POST");
const ANY: Option<&str> = None;

pub static RULES: &[Rule] = &[
    rule(POST, "/auth/login", Access::Public),
    rule(GET, "/auth/test", Access::Public),
    rule(GET, "/auth/admin-test", Access::Role(ROLE_ADMIN)),
    rule(GET, "/public/**", Access::Public),
    rule(GET, "/docs/**", Access::Public),
    rule(GET, "/api-docs/**", Access::Public),
    rule(GET, "/cars/**", Access::Public),
    rule(ANY, "/cars/**", Access::Role(ROLE_ADMIN)),
    rule(GET, "/accessories/car/*", Access::Authenticated),
    rule(GET, "/accessories/available", Access::Authenticated),
    rule(ANY, "/accessories/**", Access::Role(ROLE_ADMIN)),
    rule(POST, "/rentals", Access::Public),
    rule(GET, "/rentals/customer/*", Access::Authenticated),
    rule(ANY, "/rentals/**", Access::Role(ROLE_ADMIN)),
];

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Match `path` against a pattern made of literal, `*` and trailing `**` segments.
pub fn matches(pattern: &str, path: &str) -> bool {
    let pat = segments(pattern);
    let got = segments(path);
    let mut i = 0;
    for p in &pat {
        match *p {
            "**" => return true,
            "*" => {
                if i >= got.len() {
                    return false;
                }
            }
            lit => {
                if got.get(i) != Some(&lit) {
                    return false;
                }
            }
        }
        i += 1;
    }
    i == got.len()
}

/// Access level required for `method path`.
pub fn required_access(method: &Method, path: &str) -> Access {
    RULES
        .iter()
        .find(|r| r.method.map_or(true, |m| m == method.as_str()) && matches(r.pattern, path))
        .map(|r| r.access)
        .unwrap_or(Access::Authenticated)
}

fn bearer(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolve the bearer token once, enforce the rule table and stash the
/// [`Principal`] in request extensions for handlers.
pub async fn authorize(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let access = required_access(req.method(), &path);
    let principal = bearer(&req).and_then(|t| state.tokens.resolve(t));

    match access {
        Access::Public => {}
        Access::Authenticated | Access::Role(_) if principal.is_none() => {
            warn!(path = %path, method = %req.method(), "missing or invalid bearer token");
            return Err(ApiError::Unauthorized("Full authentication is required to access this resource".into()));
        }
        Access::Role(role) => {
            let allowed = principal.as_ref().map_or(false, |p| p.has_role(role));
            if !allowed {
                warn!(path = %path, role, "principal lacks required role");
                return Err(ApiError::AccessDenied);
            }
        }
        Access::Authenticated => {}
    }

    if let Some(p) = principal {
        debug!(username = %p.username, path = %path, "principal resolved");
        req.extensions_mut().insert::<Principal>(p);
    }
    Ok(next.run(req).await)
}
