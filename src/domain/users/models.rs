//! User Models

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Raised when a stored role column holds an unexpected value.
#[derive(Debug, Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl TryFrom<&str> for Role {
    type Error = UnknownRole;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User Model
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
}

/// Proof that a request acts on behalf of an active administrator.
///
/// Constructible only via [`super::UsersService::require_admin`]; admin-gated
/// operations take a reference to this token instead of probing roles.
#[derive(Debug, Clone)]
pub struct AdminCapability {
    user_uuid: Uuid,
}

impl AdminCapability {
    pub(crate) fn new(user_uuid: Uuid) -> Self {
        Self { user_uuid }
    }

    /// The administrator this capability was granted to.
    #[must_use]
    pub fn user_uuid(&self) -> Uuid {
        self.user_uuid
    }
}
