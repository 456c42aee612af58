//! Postgres implementation of the procedure gateway.
//!
//! Procedures are set-returning functions: `sp_Login` with two parameters
//! runs as `SELECT * FROM "sp_Login"($1, $2)`. Raw queries run as given.
//! The gateway owns one connection for the whole session; there is no pool.

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, PgRow, PgSslMode};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::{Arguments, Column, Connection, Row, TypeInfo, ValueRef};
use srms_core::config::SslMode;
use srms_core::{NullType, SqlValue, UpstreamConfig};
use std::time::Instant;

use crate::call::Call;
use crate::error::GatewayError;
use crate::result::ResultSet;
use crate::ProcedureGateway;

fn args_add<T>(args: &mut PgArguments, index: usize, v: T) -> Result<(), GatewayError>
where
    T: Send + Sync + 'static,
    for<'q> T: sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    args.add(v).map_err(|e| GatewayError::Bind {
        index,
        message: e.to_string(),
    })
}

/// A single owned connection to the records database.
pub struct PostgresGateway {
    conn: PgConnection,
    target: String,
}

impl PostgresGateway {
    /// Connect using the upstream section of the configuration.
    pub async fn connect(config: &UpstreamConfig) -> Result<Self, GatewayError> {
        let target = config.display_target();
        let options = connect_options(config).map_err(|e| GatewayError::Connect {
            target: target.clone(),
            message: e.to_string(),
        })?;
        Self::connect_with(&options, target).await
    }

    /// Connect to an explicit URL. `target` is the password-free label used
    /// in logs and errors.
    pub async fn connect_url(url: &str, target: impl Into<String>) -> Result<Self, GatewayError> {
        let target = target.into();
        let options = url
            .parse::<PgConnectOptions>()
            .map_err(|e| GatewayError::Connect {
                target: target.clone(),
                message: e.to_string(),
            })?;
        Self::connect_with(&options, target).await
    }

    async fn connect_with(options: &PgConnectOptions, target: String) -> Result<Self, GatewayError> {
        let conn = PgConnection::connect_with(options)
            .await
            .map_err(|e| GatewayError::Connect {
                target: target.clone(),
                message: e.to_string(),
            })?;
        tracing::info!(database = %target, "Connected to records database");
        Ok(Self { conn, target })
    }
}

/// Driver options for `config`. A configured URL is parsed as is; otherwise
/// each field is set on its own so credentials need no escaping.
pub fn connect_options(config: &UpstreamConfig) -> Result<PgConnectOptions, sqlx::Error> {
    if let Some(url) = config.database_url() {
        return url.parse();
    }
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .database(&config.database)
        .ssl_mode(ssl_mode(config.ssl_mode));
    if let Some(password) = config.resolved_password() {
        options = options.password(&password);
    }
    Ok(options)
}

fn ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}

#[async_trait]
impl ProcedureGateway for PostgresGateway {
    async fn invoke(&mut self, call: &Call) -> Result<ResultSet, GatewayError> {
        let started = Instant::now();
        let sql = match call {
            Call::Procedure { name, params } => procedure_sql(name, params.len())?,
            Call::Query { sql, .. } => sql.clone(),
        };

        let mut args = PgArguments::default();
        for (i, value) in call.params().iter().enumerate() {
            bind_value(&mut args, i + 1, value)?;
        }

        let rows = match sqlx::query_with(&sql, args).fetch_all(&mut self.conn).await {
            Ok(rows) => rows,
            Err(e) => {
                let err = GatewayError::from(e);
                tracing::warn!(
                    call = %call.label(),
                    params = call.params().len(),
                    error = %err,
                    "Call failed"
                );
                return Err(err);
            }
        };

        let result = decode_rows(&rows)?;
        tracing::info!(
            call = %call.label(),
            params = call.params().len(),
            rows = result.row_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Call completed"
        );
        Ok(result)
    }

    async fn close(self) -> Result<(), GatewayError> {
        tracing::info!(database = %self.target, "Closing records database connection");
        self.conn.close().await.map_err(GatewayError::from)
    }
}

fn quote_ident(ident: &str) -> Result<String, GatewayError> {
    if ident.is_empty() || !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GatewayError::InvalidName(ident.to_string()));
    }
    Ok(format!("\"{}\"", ident))
}

/// Quote a procedure name, allowing one `schema.` prefix.
fn quote_procedure_name(name: &str) -> Result<String, GatewayError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(GatewayError::InvalidName(name.to_string()));
    }
    let quoted = parts
        .iter()
        .map(|part| quote_ident(part).map_err(|_| GatewayError::InvalidName(name.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(quoted.join("."))
}

fn procedure_sql(name: &str, arity: usize) -> Result<String, GatewayError> {
    let placeholders = (1..=arity)
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "SELECT * FROM {}({})",
        quote_procedure_name(name)?,
        placeholders
    ))
}

fn bind_value(args: &mut PgArguments, index: usize, value: &SqlValue) -> Result<(), GatewayError> {
    match value {
        SqlValue::Null(NullType::Int) => args_add(args, index, Option::<i32>::None),
        SqlValue::Null(NullType::Float) => args_add(args, index, Option::<f64>::None),
        SqlValue::Null(NullType::Text) => args_add(args, index, Option::<String>::None),
        SqlValue::Null(NullType::Bool) => args_add(args, index, Option::<bool>::None),
        SqlValue::Bool(b) => args_add(args, index, *b),
        SqlValue::Int(n) => args_add(args, index, *n),
        SqlValue::BigInt(n) => args_add(args, index, *n),
        SqlValue::Float(f) => args_add(args, index, *f),
        SqlValue::Text(s) => args_add(args, index, s.clone()),
    }
}

fn decode_rows(rows: &[PgRow]) -> Result<ResultSet, GatewayError> {
    let Some(first) = rows.first() else {
        return Ok(ResultSet::empty());
    };

    // A function returning `void` still yields one row with one void column.
    if !first.columns().is_empty()
        && first
            .columns()
            .iter()
            .all(|c| c.type_info().name() == "VOID")
    {
        return Ok(ResultSet::empty());
    }

    let columns = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut decoded = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = (0..row.len())
            .map(|idx| decode_cell(row, idx))
            .collect::<Result<Vec<_>, _>>()?;
        decoded.push(cells);
    }

    Ok(ResultSet::new(columns, decoded))
}

fn null_type_for(type_name: &str) -> NullType {
    match type_name {
        "INT2" | "INT4" | "INT8" => NullType::Int,
        "FLOAT4" | "FLOAT8" | "NUMERIC" => NullType::Float,
        "BOOL" => NullType::Bool,
        _ => NullType::Text,
    }
}

fn decode_cell(row: &PgRow, idx: usize) -> Result<SqlValue, GatewayError> {
    let type_name = row.column(idx).type_info().name().to_string();
    if row.try_get_raw(idx)?.is_null() {
        return Ok(SqlValue::Null(null_type_for(&type_name)));
    }

    let value = match type_name.as_str() {
        "BOOL" => SqlValue::Bool(row.try_get(idx)?),
        "INT2" => SqlValue::Int(i32::from(row.try_get::<i16, _>(idx)?)),
        "INT4" => SqlValue::Int(row.try_get(idx)?),
        "INT8" => SqlValue::BigInt(row.try_get(idx)?),
        "FLOAT4" => SqlValue::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        "FLOAT8" => SqlValue::Float(row.try_get(idx)?),
        "NUMERIC" => SqlValue::Text(row.try_get::<sqlx::types::BigDecimal, _>(idx)?.to_string()),
        "DATE" => SqlValue::Text(
            row.try_get::<NaiveDate, _>(idx)?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        "TIME" => SqlValue::Text(
            row.try_get::<NaiveTime, _>(idx)?
                .format("%H:%M:%S")
                .to_string(),
        ),
        "TIMESTAMP" => SqlValue::Text(
            row.try_get::<NaiveDateTime, _>(idx)?
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ),
        "TIMESTAMPTZ" => SqlValue::Text(
            row.try_get::<DateTime<Utc>, _>(idx)?
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        ),
        other => match row.try_get::<String, _>(idx) {
            Ok(s) => SqlValue::Text(s),
            Err(_) => SqlValue::Text(format!("<{}>", other.to_lowercase())),
        },
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_sql_quotes_mixed_case_names() {
        assert_eq!(
            procedure_sql("sp_Login", 2).unwrap(),
            r#"SELECT * FROM "sp_Login"($1, $2)"#
        );
        assert_eq!(
            procedure_sql("records.sp_ViewCourses", 2).unwrap(),
            r#"SELECT * FROM "records"."sp_ViewCourses"($1, $2)"#
        );
    }

    #[test]
    fn test_procedure_sql_without_params() {
        assert_eq!(
            procedure_sql("sp_Ping", 0).unwrap(),
            r#"SELECT * FROM "sp_Ping"()"#
        );
    }

    #[test]
    fn test_procedure_names_must_be_identifiers() {
        for bad in ["", "sp_Login; DROP TABLE Users", "a.b.c", "sp-login", "\"sp\"", ".sp"] {
            assert!(
                matches!(procedure_sql(bad, 1), Err(GatewayError::InvalidName(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_connect_options_keep_reserved_characters_in_password() {
        let config = UpstreamConfig {
            database_url_env: None,
            password: Some("p@ss#1".to_string()),
            ..Default::default()
        };
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "srms");
        assert_eq!(options.get_database(), Some("srms"));
    }

    #[test]
    fn test_connect_options_prefer_configured_url() {
        let config = UpstreamConfig {
            database_url_env: None,
            database_url: Some("postgresql://registrar@db.example.edu:6543/records".to_string()),
            host: "ignored".to_string(),
            ssl_mode: SslMode::Require,
            ..Default::default()
        };
        let options = connect_options(&config).unwrap();
        assert_eq!(options.get_host(), "db.example.edu");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("records"));
    }

    #[test]
    fn test_ssl_mode_maps_to_driver() {
        let config = UpstreamConfig {
            database_url_env: None,
            ssl_mode: SslMode::VerifyFull,
            ..Default::default()
        };
        let options = connect_options(&config).unwrap();
        assert!(matches!(options.get_ssl_mode(), PgSslMode::VerifyFull));
    }

    #[test]
    fn test_null_types_follow_column_types() {
        assert_eq!(null_type_for("INT4"), NullType::Int);
        assert_eq!(null_type_for("NUMERIC"), NullType::Float);
        assert_eq!(null_type_for("BOOL"), NullType::Bool);
        assert_eq!(null_type_for("VARCHAR"), NullType::Text);
    }

    #[test]
    fn test_bind_every_value_kind() {
        let mut args = PgArguments::default();
        let values = [
            SqlValue::null_int(),
            SqlValue::null_text(),
            SqlValue::Null(NullType::Float),
            SqlValue::Null(NullType::Bool),
            SqlValue::Bool(true),
            SqlValue::Int(1),
            SqlValue::BigInt(2),
            SqlValue::Float(3.5),
            SqlValue::from("x"),
        ];
        for (i, v) in values.iter().enumerate() {
            bind_value(&mut args, i + 1, v).unwrap();
        }
        assert_eq!(args.len(), values.len());
    }
}
