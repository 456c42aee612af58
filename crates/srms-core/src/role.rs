//! Roles and clearance levels.
//!
//! Both values are assigned by the database at login and trusted for the
//! lifetime of a session. The front-end only forwards them as procedure
//! parameters and uses the role to pick the navigation table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A user role as spelled by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Instructor,
    #[serde(rename = "TA")]
    Ta,
    Student,
    Guest,
}

impl Role {
    /// Every role, in the order offered by the "Add User" form.
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Instructor,
        Role::Ta,
        Role::Student,
        Role::Guest,
    ];

    /// Database spelling of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Instructor => "Instructor",
            Role::Ta => "TA",
            Role::Student => "Student",
            Role::Guest => "Guest",
        }
    }

    /// Clearance assigned to a newly registered user of this role.
    pub fn default_clearance(&self) -> ClearanceLevel {
        match self {
            Role::Admin => ClearanceLevel::TOP_SECRET,
            Role::Instructor => ClearanceLevel::SECRET,
            Role::Ta => ClearanceLevel::CONFIDENTIAL,
            Role::Student | Role::Guest => ClearanceLevel::UNCLASSIFIED,
        }
    }

    /// Roles this role may ask to be upgraded to.
    pub fn upgrade_targets(&self) -> &'static [Role] {
        match self {
            Role::Student => &[Role::Ta, Role::Instructor],
            Role::Ta => &[Role::Instructor],
            Role::Admin | Role::Instructor | Role::Guest => &[],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role or clearance value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleParseError {
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("clearance level {0} is outside 1..=4")]
    ClearanceOutOfRange(i64),
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Admin" => Ok(Role::Admin),
            "Instructor" => Ok(Role::Instructor),
            "TA" => Ok(Role::Ta),
            "Student" => Ok(Role::Student),
            "Guest" => Ok(Role::Guest),
            other => Err(RoleParseError::UnknownRole(other.to_string())),
        }
    }
}

/// Data-visibility tier, 1 (lowest) to 4 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ClearanceLevel(u8);

impl ClearanceLevel {
    pub const UNCLASSIFIED: ClearanceLevel = ClearanceLevel(1);
    pub const CONFIDENTIAL: ClearanceLevel = ClearanceLevel(2);
    pub const SECRET: ClearanceLevel = ClearanceLevel(3);
    pub const TOP_SECRET: ClearanceLevel = ClearanceLevel(4);

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Human-readable tier name shown on the dashboard.
    pub fn name(&self) -> &'static str {
        match self.0 {
            1 => "Unclassified",
            2 => "Confidential",
            3 => "Secret",
            _ => "Top Secret",
        }
    }
}

impl TryFrom<i64> for ClearanceLevel {
    type Error = RoleParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1..=4 => Ok(ClearanceLevel(value as u8)),
            other => Err(RoleParseError::ClearanceOutOfRange(other)),
        }
    }
}

impl From<ClearanceLevel> for i64 {
    fn from(level: ClearanceLevel) -> Self {
        i64::from(level.0)
    }
}

impl fmt::Display for ClearanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_database_spelling() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(" TA ".parse::<Role>().unwrap(), Role::Ta);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = "Superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, RoleParseError::UnknownRole("Superuser".to_string()));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uses_database_spelling() {
        let yaml = serde_yaml::to_string(&Role::Ta).unwrap();
        assert_eq!(yaml.trim(), "TA");
        let role: Role = serde_yaml::from_str("Instructor").unwrap();
        assert_eq!(role, Role::Instructor);
    }

    #[test]
    fn test_default_clearance_per_role() {
        assert_eq!(Role::Admin.default_clearance().level(), 4);
        assert_eq!(Role::Instructor.default_clearance().level(), 3);
        assert_eq!(Role::Ta.default_clearance().level(), 2);
        assert_eq!(Role::Student.default_clearance().level(), 1);
        assert_eq!(Role::Guest.default_clearance().level(), 1);
    }

    #[test]
    fn test_upgrade_targets() {
        assert_eq!(Role::Student.upgrade_targets(), &[Role::Ta, Role::Instructor]);
        assert_eq!(Role::Ta.upgrade_targets(), &[Role::Instructor]);
        assert!(Role::Admin.upgrade_targets().is_empty());
        assert!(Role::Guest.upgrade_targets().is_empty());
    }

    #[test]
    fn test_clearance_bounds_and_names() {
        assert!(ClearanceLevel::try_from(0).is_err());
        assert!(ClearanceLevel::try_from(5).is_err());
        assert_eq!(ClearanceLevel::try_from(1).unwrap().name(), "Unclassified");
        assert_eq!(ClearanceLevel::try_from(2).unwrap().name(), "Confidential");
        assert_eq!(ClearanceLevel::try_from(3).unwrap().name(), "Secret");
        assert_eq!(ClearanceLevel::try_from(4).unwrap().name(), "Top Secret");
    }
}
