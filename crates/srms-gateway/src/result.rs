//! Rows returned by a call.

use srms_core::SqlValue;

/// Column names and rows of a single result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    /// "Executed, nothing to show."
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<SqlValue>] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<SqlValue>>) {
        (self.columns, self.rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        self.rows.get(index).map(|cells| RowRef {
            columns: &self.columns,
            cells,
        })
    }

    pub fn first_row(&self) -> Option<RowRef<'_>> {
        self.row(0)
    }
}

/// A borrowed row with name-based access.
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [SqlValue],
}

impl<'a> RowRef<'a> {
    pub fn cell(&self, index: usize) -> Option<&'a SqlValue> {
        self.cells.get(index)
    }

    /// Cell of the named column. Names compare exactly, then case-insensitively
    /// since Postgres folds unquoted output names to lower case.
    pub fn get(&self, column: &str) -> Option<&'a SqlValue> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == column)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(column)))?;
        self.cells.get(idx)
    }

    /// Non-null cell of the named column rendered as text.
    pub fn get_string(&self, column: &str) -> Option<String> {
        self.get(column)
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(SqlValue::as_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::new(
            vec!["Result".to_string(), "userid".to_string()],
            vec![vec![SqlValue::from("Success"), SqlValue::Int(7)]],
        )
    }

    #[test]
    fn test_empty_result_set() {
        let rs = ResultSet::empty();
        assert!(rs.is_empty());
        assert!(rs.columns().is_empty());
        assert!(rs.first_row().is_none());
    }

    #[test]
    fn test_row_lookup_by_name() {
        let rs = sample();
        let row = rs.first_row().unwrap();
        assert_eq!(row.get_string("Result").as_deref(), Some("Success"));
        assert_eq!(row.get_i64("UserID"), Some(7));
        assert!(row.get("Missing").is_none());
    }

    #[test]
    fn test_null_cells_are_not_strings() {
        let rs = ResultSet::new(
            vec!["Message".to_string()],
            vec![vec![SqlValue::null_text()]],
        );
        assert_eq!(rs.first_row().unwrap().get_string("Message"), None);
    }
}
