//! Tabular output produced at the end of a sweep.
//!
//! Tables are plain data here; rendering to console/CSV/files is a concern of
//! the export layer, not this crate.

use serde::{Deserialize, Serialize};

/// One cell of a result table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableCell {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl std::fmt::Display for TableCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.1}"),
        }
    }
}

impl From<&str> for TableCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for TableCell {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u64> for TableCell {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

/// An append-only table of sweep results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<TableCell>>,
}

impl ResultTable {
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn insert_row(&mut self, row: Vec<TableCell>) {
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_append_in_order() {
        let mut table = ResultTable::new(
            "Models (Inference)",
            vec!["Model".to_string(), "Batch".to_string()],
        );
        table.insert_row(vec!["m1".into(), TableCell::Integer(1)]);
        table.insert_row(vec!["m1".into(), TableCell::Integer(8)]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][1], TableCell::Integer(1));
        assert_eq!(table.rows()[1][1], TableCell::Integer(8));
    }

    #[test]
    fn cells_display_plainly() {
        assert_eq!(TableCell::Text("m1".to_string()).to_string(), "m1");
        assert_eq!(TableCell::Integer(8).to_string(), "8");
        assert_eq!(TableCell::Float(123.45).to_string(), "123.5");
    }
}
