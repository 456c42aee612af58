//! Error types for the shell crate.

use srms_core::Role;
use srms_gateway::GatewayError;
use thiserror::Error;

use crate::navigation::ViewId;

/// Errors surfaced to the user while a session is open.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The database could not be reached. The session cannot continue.
    #[error("database unavailable: {0}")]
    Connectivity(String),

    /// A procedure reported a failure. Shown verbatim; the session continues.
    #[error("{0}")]
    Procedure(String),

    /// Input rejected before any call was made.
    #[error("{0}")]
    Validation(String),

    /// The view is not in the session role's navigation table.
    #[error("'{view}' is not available to the {role} role")]
    ViewNotPermitted { view: ViewId, role: Role },
}

impl ShellError {
    pub fn validation(message: impl Into<String>) -> Self {
        ShellError::Validation(message.into())
    }

    pub fn procedure(message: impl Into<String>) -> Self {
        ShellError::Procedure(message.into())
    }

    /// Whether the session has to be abandoned.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Connectivity(_))
    }
}

impl From<GatewayError> for ShellError {
    fn from(err: GatewayError) -> Self {
        if err.is_connectivity() {
            ShellError::Connectivity(err.to_string())
        } else {
            ShellError::Procedure(err.to_string())
        }
    }
}

/// Reasons a login attempt produced no session.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Username or password left empty; no call was made.
    #[error("Please enter username and password")]
    MissingCredentials,

    /// `sp_Login` answered with a non-success status.
    #[error("{0}")]
    Rejected(String),

    /// `sp_Login` returned no rows.
    #[error("Invalid credentials")]
    NoResponse,

    /// A success row that cannot be turned into a session.
    #[error("malformed login response: {0}")]
    Malformed(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl LoginError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, LoginError::Gateway(e) if e.is_connectivity())
    }
}
