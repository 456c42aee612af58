//! Error types for the gateway crate.

use thiserror::Error;

/// Errors raised by a [`ProcedureGateway`](crate::ProcedureGateway).
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The database could not be reached when opening the connection.
    #[error("failed to connect to {target}: {message}")]
    Connect { target: String, message: String },

    /// The open connection failed underneath a call.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// The procedure or query raised an error.
    #[error("{0}")]
    Execution(String),

    /// The procedure name is not a plain identifier.
    #[error("invalid procedure name '{0}'")]
    InvalidName(String),

    /// A parameter could not be encoded.
    #[error("failed to bind parameter {index}: {message}")]
    Bind { index: usize, message: String },
}

impl GatewayError {
    /// Whether the failure is about reaching the database at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            GatewayError::Connect { .. } | GatewayError::ConnectionLost(_)
        )
    }
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => GatewayError::Execution(db.message().to_string()),
            sqlx::Error::Io(e) => GatewayError::ConnectionLost(e.to_string()),
            sqlx::Error::Tls(e) => GatewayError::ConnectionLost(e.to_string()),
            sqlx::Error::Protocol(msg) => GatewayError::ConnectionLost(msg),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
                GatewayError::ConnectionLost(err.to_string())
            }
            other => GatewayError::Execution(other.to_string()),
        }
    }
}
