//! User entity - a registered marketplace account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Role of a registered user
///
/// Immutable after creation: registration always produces `User`, and
/// admins only exist through seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// User entity as handed to services and DTOs
///
/// The login credential is deliberately absent: it lives only in the
/// store layer and never appears on any value leaving the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_ref: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, name: String, email: String, role: UserRole, avatar_ref: String) -> Self {
        Self {
            id,
            name,
            email,
            role,
            avatar_ref,
            created_at: Utc::now(),
        }
    }

    /// Check whether this user may moderate listings
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Authenticated-actor token for mutating workflow calls
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

/// Authenticated actor passed into every mutating workflow operation
///
/// Carries only what authorization checks need; resolving the full user
/// record stays with the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Snowflake,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Snowflake, role: UserRole) -> Self {
        Self { id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
