//! A scripted gateway for tests.
//!
//! Responses are queued up front and handed out in call order; once the
//! queue is empty every call returns an empty result set. All calls are
//! recorded in a [`CallLog`] that stays readable after the gateway has
//! been moved into a navigator or closed.

use async_trait::async_trait;
use srms_core::SqlValue;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::call::Call;
use crate::error::GatewayError;
use crate::result::ResultSet;
use crate::ProcedureGateway;

/// Shared record of the calls made through a [`ScriptedGateway`].
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
    closed: Arc<AtomicBool>,
}

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Procedure names (or `query`) in call order.
    pub fn labels(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.label().to_string()).collect()
    }

    pub fn last(&self) -> Option<Call> {
        self.calls().last().cloned()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Gateway that replays queued responses.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    responses: VecDeque<Result<ResultSet, GatewayError>>,
    log: CallLog,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(mut self, rs: ResultSet) -> Self {
        self.responses.push_back(Ok(rs));
        self
    }

    /// Queue a failure.
    pub fn fail(mut self, err: GatewayError) -> Self {
        self.responses.push_back(Err(err));
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

#[async_trait]
impl ProcedureGateway for ScriptedGateway {
    async fn invoke(&mut self, call: &Call) -> Result<ResultSet, GatewayError> {
        if let Ok(mut calls) = self.log.calls.lock() {
            calls.push(call.clone());
        }
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(ResultSet::empty()))
    }

    async fn close(self) -> Result<(), GatewayError> {
        self.log.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Build a result set from string column names and rows.
pub fn rows(columns: &[&str], rows: Vec<Vec<SqlValue>>) -> ResultSet {
    ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
}

/// A one-row status result: `Result`, `Message`, `ErrorMessage`.
pub fn status(result: &str, message: Option<&str>, error_message: Option<&str>) -> ResultSet {
    rows(
        &["Result", "Message", "ErrorMessage"],
        vec![vec![
            result.into(),
            message.map(str::to_string).into(),
            error_message.map(str::to_string).into(),
        ]],
    )
}

/// A successful `sp_Login` row.
pub fn login_success(user_id: i32, username: &str, role: &str, clearance: i32) -> ResultSet {
    rows(
        &["Result", "UserID", "Username", "Role", "ClearanceLevel", "Message"],
        vec![vec![
            "Success".into(),
            SqlValue::Int(user_id),
            username.into(),
            role.into(),
            SqlValue::Int(clearance),
            "Login successful".into(),
        ]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_responses_replay_in_order_then_empty() {
        let mut gateway = ScriptedGateway::new()
            .respond(status("Success", None, None))
            .fail(GatewayError::Execution("boom".to_string()));
        let log = gateway.log();

        let first = gateway.invoke(&Call::query("SELECT 1")).await.unwrap();
        assert_eq!(first.row_count(), 1);
        assert!(gateway.invoke(&Call::query("SELECT 2")).await.is_err());
        assert!(gateway.invoke(&Call::query("SELECT 3")).await.unwrap().is_empty());

        assert_eq!(log.len(), 3);
        gateway.close().await.unwrap();
        assert!(log.is_closed());
    }
}
