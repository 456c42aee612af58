//! # srms-gateway
//!
//! The single boundary between the SRMS console and its database.
//!
//! Every view and form ends in one [`ProcedureGateway::invoke`]: a named
//! procedure (or a raw query) with positional parameters, answered by a
//! [`ResultSet`] of column names and rows, or a [`GatewayError`].
//!
//! - [`postgres::PostgresGateway`] owns exactly one Postgres connection.
//! - [`contract`] holds the procedure catalog and the typed records decoded
//!   from status rows.
//! - `testing::ScriptedGateway` (feature `testing`) replays canned results.

use async_trait::async_trait;

pub mod call;
pub mod contract;
pub mod error;
pub mod postgres;
pub mod result;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use call::Call;
pub use error::GatewayError;
pub use postgres::PostgresGateway;
pub use result::{ResultSet, RowRef};

/// Executes procedure calls against the records database.
///
/// Parameters are passed through untouched: type and arity checking is the
/// procedure's job. Each call is its own unit of work and nothing is
/// retried.
#[async_trait]
pub trait ProcedureGateway: Send {
    /// Invoke a procedure or query and collect its rows.
    ///
    /// A call that succeeds without producing rows returns an empty
    /// [`ResultSet`], not an error.
    async fn invoke(&mut self, call: &Call) -> Result<ResultSet, GatewayError>;

    /// Close the underlying connection.
    async fn close(self) -> Result<(), GatewayError>
    where
        Self: Sized;
}
