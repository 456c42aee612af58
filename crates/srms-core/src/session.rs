//! The authenticated session.

use chrono::{DateTime, Utc};

use crate::role::{ClearanceLevel, Role};

/// Identity, role and clearance of the logged-in user.
///
/// Built once from a successful `sp_Login` row and never modified; a new
/// login produces a new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: i64,
    username: String,
    role: Role,
    clearance: ClearanceLevel,
    logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        role: Role,
        clearance: ClearanceLevel,
    ) -> Self {
        Self::at(user_id, username, role, clearance, Utc::now())
    }

    /// Create a session with an explicit login time.
    pub fn at(
        user_id: i64,
        username: impl Into<String>,
        role: Role,
        clearance: ClearanceLevel,
        logged_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            clearance,
            logged_in_at,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn clearance(&self) -> ClearanceLevel {
        self.clearance
    }

    pub fn logged_in_at(&self) -> DateTime<Utc> {
        self.logged_in_at
    }
}
