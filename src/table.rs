//! Static table descriptors: one per record kind.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::AppError;
use crate::sql::SqlValue;

/// Storage type of one column; drives SELECT casts, row decoding and key parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Float,
    Text,
    Date,
}

impl ColumnKind {
    /// PostgreSQL type the column is read as.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Int => "int4",
            ColumnKind::Float => "float8",
            ColumnKind::Text => "text",
            ColumnKind::Date => "date",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Column { name, kind }
    }
}

/// Describes the table behind one resource.
///
/// Rows are always laid out key columns first, then value columns. When
/// `generated_key` is set the single key column is assigned by the store on
/// insert and returned to the caller.
#[derive(Debug)]
pub struct TableSpec {
    pub table: &'static str,
    pub key: &'static [Column],
    pub values: &'static [Column],
    pub generated_key: bool,
}

impl TableSpec {
    /// All columns in row order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.key.iter().chain(self.values.iter())
    }

    pub fn width(&self) -> usize {
        self.key.len() + self.values.len()
    }

    /// Parse the row key from query parameters named after the key columns.
    pub fn key_from_query(&self, params: &HashMap<String, String>) -> Result<Vec<SqlValue>, AppError> {
        self.key
            .iter()
            .map(|col| {
                let raw = params
                    .get(col.name)
                    .ok_or_else(|| AppError::BadRequest(format!("missing query parameter '{}'", col.name)))?;
                parse_param(col, raw)
            })
            .collect()
    }
}

fn parse_param(col: &Column, raw: &str) -> Result<SqlValue, AppError> {
    let invalid = || AppError::BadRequest(format!("invalid {} '{}'", col.name, raw));
    Ok(match col.kind {
        ColumnKind::Int => SqlValue::Int(raw.parse().map_err(|_| invalid())?),
        ColumnKind::Float => SqlValue::Float(raw.parse().map_err(|_| invalid())?),
        ColumnKind::Text if raw.is_empty() => return Err(invalid()),
        ColumnKind::Text => SqlValue::Text(raw.to_string()),
        ColumnKind::Date => {
            SqlValue::Date(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?)
        }
    })
}
