//! Procedure and query invocations.

use srms_core::SqlValue;

/// One request to the database.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// A named server-side procedure with positional parameters.
    Procedure { name: String, params: Vec<SqlValue> },
    /// A raw SQL statement with `$n` placeholders.
    Query { sql: String, params: Vec<SqlValue> },
}

impl Call {
    pub fn procedure(name: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Call::Procedure {
            name: name.into(),
            params,
        }
    }

    pub fn query(sql: impl Into<String>) -> Self {
        Call::Query {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Short label for logs: the procedure name, or `query`.
    pub fn label(&self) -> &str {
        match self {
            Call::Procedure { name, .. } => name,
            Call::Query { .. } => "query",
        }
    }

    pub fn params(&self) -> &[SqlValue] {
        match self {
            Call::Procedure { params, .. } | Call::Query { params, .. } => params,
        }
    }

    /// Procedure name, if this is a procedure call.
    pub fn procedure_name(&self) -> Option<&str> {
        match self {
            Call::Procedure { name, .. } => Some(name),
            Call::Query { .. } => None,
        }
    }
}
