//! Credentials to session.

use srms_core::{ClearanceLevel, Role, Session};
use srms_gateway::contract::{self, LoginRecord};
use srms_gateway::ProcedureGateway;
use tracing::{debug, info};

use crate::error::LoginError;

/// Authenticate through `sp_Login`.
///
/// The username is trimmed and the password passed as typed. Empty input
/// is rejected before the gateway is touched.
pub async fn login<G: ProcedureGateway>(
    gateway: &mut G,
    username: &str,
    password: &str,
) -> Result<Session, LoginError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let rs = gateway.invoke(&contract::login(username, password)).await?;
    let record = LoginRecord::from_result(&rs).ok_or(LoginError::NoResponse)?;

    if !record.is_success() {
        info!(username, result = %record.result, "Login rejected");
        return Err(LoginError::Rejected(
            record.message.unwrap_or_else(|| "Login failed".to_string()),
        ));
    }

    let session = session_from(record, username)?;
    info!(
        user_id = session.user_id(),
        role = %session.role(),
        clearance = session.clearance().level(),
        "Login succeeded"
    );
    Ok(session)
}

fn session_from(record: LoginRecord, typed_username: &str) -> Result<Session, LoginError> {
    let user_id = record
        .user_id
        .ok_or_else(|| LoginError::Malformed("missing UserID".to_string()))?;
    let role: Role = record
        .role
        .as_deref()
        .ok_or_else(|| LoginError::Malformed("missing Role".to_string()))?
        .parse()
        .map_err(|e| LoginError::Malformed(format!("{e}")))?;
    let clearance = record
        .clearance_level
        .ok_or_else(|| LoginError::Malformed("missing ClearanceLevel".to_string()))
        .and_then(|level| {
            ClearanceLevel::try_from(level).map_err(|e| LoginError::Malformed(e.to_string()))
        })?;

    let username = record.username.unwrap_or_else(|| {
        debug!("sp_Login returned no Username, keeping the typed one");
        typed_username.to_string()
    });
    Ok(Session::new(user_id, username, role, clearance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use srms_core::SqlValue;
    use srms_gateway::testing::{login_success, rows, status, ScriptedGateway};
    use srms_gateway::GatewayError;

    #[tokio::test]
    async fn test_empty_credentials_make_no_call() {
        let mut gateway = ScriptedGateway::new();
        let log = gateway.log();

        for (user, pass) in [("", "pw"), ("   ", "pw"), ("admin1", "")] {
            let err = login(&mut gateway, user, pass).await.unwrap_err();
            assert!(matches!(err, LoginError::MissingCredentials));
        }
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_success_builds_session() {
        let mut gateway = ScriptedGateway::new().respond(login_success(1, "admin1", "Admin", 4));
        let log = gateway.log();

        let session = login(&mut gateway, " admin1 ", "Admin@123").await.unwrap();
        assert_eq!(session.user_id(), 1);
        assert_eq!(session.username(), "admin1");
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.clearance(), ClearanceLevel::TOP_SECRET);

        let call = log.last().unwrap();
        assert_eq!(call.procedure_name(), Some("sp_Login"));
        assert_eq!(call.params()[0], SqlValue::from("admin1"));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_message() {
        let mut gateway =
            ScriptedGateway::new().respond(status("Failed", Some("Invalid username or password"), None));
        let err = login(&mut gateway, "nobody", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_rejection_without_message() {
        let mut gateway = ScriptedGateway::new().respond(status("Failed", None, None));
        let err = login(&mut gateway, "nobody", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[tokio::test]
    async fn test_no_rows_is_invalid_credentials() {
        let mut gateway = ScriptedGateway::new();
        let err = login(&mut gateway, "nobody", "wrong").await.unwrap_err();
        assert!(matches!(err, LoginError::NoResponse));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_role_is_malformed() {
        let mut gateway = ScriptedGateway::new().respond(login_success(3, "dean", "Dean", 4));
        let err = login(&mut gateway, "dean", "pw").await.unwrap_err();
        assert!(matches!(err, LoginError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_clearance_out_of_range_is_malformed() {
        let mut gateway = ScriptedGateway::new().respond(login_success(3, "x", "Student", 9));
        assert!(matches!(
            login(&mut gateway, "x", "pw").await,
            Err(LoginError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_user_id_is_malformed() {
        let rs = rows(
            &["Result", "Role", "ClearanceLevel"],
            vec![vec!["Success".into(), "Student".into(), SqlValue::Int(1)]],
        );
        let mut gateway = ScriptedGateway::new().respond(rs);
        assert!(matches!(
            login(&mut gateway, "x", "pw").await,
            Err(LoginError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_connectivity_failure_is_reported() {
        let mut gateway =
            ScriptedGateway::new().fail(GatewayError::ConnectionLost("reset by peer".to_string()));
        let err = login(&mut gateway, "admin1", "pw").await.unwrap_err();
        assert!(err.is_connectivity());
    }
}
