//! Caller roles and capability checks.
//!
//! The caller's role arrives in the `x-user-role` header. Queries are open to
//! everyone, including callers without a role; writes need a specific one.

use std::fmt;
use std::str::FromStr;

use axum::http::HeaderMap;

use super::routes::AppError;

pub const ROLE_HEADER: &str = "x-user-role";

/// Role of the caller making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
    Operator,
    Authority,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Operator => "operator",
            Role::Authority => "authority",
        }
    }

    /// The caller's role, or `None` for anonymous callers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Role>, AppError> {
        let Some(value) = headers.get(ROLE_HEADER) else {
            return Ok(None);
        };
        let value = value.to_str().map_err(|_| AppError::BadRequest {
            message: format!("Invalid {ROLE_HEADER} header"),
        })?;
        value.parse().map(Some)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            "operator" => Ok(Role::Operator),
            "authority" => Ok(Role::Authority),
            other => Err(AppError::BadRequest {
                message: format!("Unknown role: {other}"),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that the caller holds one of `allowed`.
pub fn require_role(headers: &HeaderMap, allowed: &[Role]) -> Result<Role, AppError> {
    match Role::from_headers(headers)? {
        Some(role) if allowed.contains(&role) => Ok(role),
        Some(role) => Err(AppError::Forbidden {
            message: format!("Role {role} may not perform this action"),
        }),
        None => Err(AppError::Forbidden {
            message: format!("Missing {ROLE_HEADER} header"),
        }),
    }
}
