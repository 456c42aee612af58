//! Positional parameters and result cells.

use std::fmt;

/// Declared type of a NULL parameter.
///
/// Postgres resolves function overloads from argument types, so a NULL has
/// to carry the type of the parameter slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullType {
    Int,
    Float,
    Text,
    Bool,
}

/// A value passed to, or returned from, a procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null(NullType),
    Bool(bool),
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn null_int() -> Self {
        SqlValue::Null(NullType::Int)
    }

    pub fn null_text() -> Self {
        SqlValue::Null(NullType::Text)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Integer view of the value. Text is parsed, floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(v) => Some(i64::from(*v)),
            SqlValue::BigInt(v) => Some(*v),
            SqlValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null(_) => Ok(()),
            SqlValue::Bool(v) => write!(f, "{}", v),
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::BigInt(v) => write!(f, "{}", v),
            SqlValue::Float(v) => write!(f, "{}", v),
            SqlValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::BigInt(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        match v {
            Some(s) => SqlValue::Text(s),
            None => SqlValue::null_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_i64_accepts_integer_like_values() {
        assert_eq!(SqlValue::Int(7).as_i64(), Some(7));
        assert_eq!(SqlValue::BigInt(9_000_000_000).as_i64(), Some(9_000_000_000));
        assert_eq!(SqlValue::from(" 42 ").as_i64(), Some(42));
        assert_eq!(SqlValue::Float(1.5).as_i64(), None);
        assert_eq!(SqlValue::null_int().as_i64(), None);
    }

    #[test]
    fn test_display_renders_null_as_empty() {
        assert_eq!(SqlValue::null_text().to_string(), "");
        assert_eq!(SqlValue::Float(87.5).to_string(), "87.5");
        assert_eq!(SqlValue::from("Success").to_string(), "Success");
    }

    #[test]
    fn test_optional_text_maps_to_typed_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null(NullType::Text));
    }
}
