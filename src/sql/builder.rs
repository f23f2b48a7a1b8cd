//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table descriptor.

use crate::sql::SqlValue;
use crate::table::{Column, TableSpec};

/// Quote identifier for PostgreSQL (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> usize {
        self.params.push(v);
        self.params.len()
    }

    /// `"a" = $n AND "b" = $m` over `cols`, binding `values` in order.
    fn push_key_predicate(&mut self, cols: &[Column], values: Vec<SqlValue>) -> String {
        cols.iter()
            .zip(values)
            .map(|(c, v)| format!("{} = ${}", quoted(c.name), self.push_param(v)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// SELECT list: each column cast to the type it is decoded as, aliased to its own name.
fn select_column_list<'a>(cols: impl Iterator<Item = &'a Column>) -> String {
    cols.map(|c| {
        let q = quoted(c.name);
        format!("{}::{} AS {}", q, c.kind.pg_type(), q)
    })
    .collect::<Vec<_>>()
    .join(", ")
}

/// Unfiltered SELECT of every column, in store order.
pub fn select_all(spec: &TableSpec) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {}",
        select_column_list(spec.columns()),
        quoted(spec.table)
    );
    q
}

/// INSERT one row. For generated keys only the value columns are written and the key is returned.
pub fn insert(spec: &TableSpec, key: Vec<SqlValue>, values: Vec<SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let (cols, row): (Vec<&Column>, Vec<SqlValue>) = if spec.generated_key {
        (spec.values.iter().collect(), values)
    } else {
        (spec.columns().collect(), key.into_iter().chain(values).collect())
    };
    let names: Vec<String> = cols.iter().map(|c| quoted(c.name)).collect();
    let placeholders: Vec<String> = row
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(spec.table),
        names.join(", "),
        placeholders.join(", ")
    );
    if spec.generated_key {
        q.sql.push_str(&format!(" RETURNING {}", select_column_list(spec.key.iter())));
    }
    q
}

/// UPDATE every value column of the row matching the key.
pub fn update(spec: &TableSpec, key: Vec<SqlValue>, values: Vec<SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = spec
        .values
        .iter()
        .zip(values)
        .map(|(c, v)| format!("{} = ${}", quoted(c.name), q.push_param(v)))
        .collect();
    let predicate = q.push_key_predicate(spec.key, key);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {}",
        quoted(spec.table),
        sets.join(", "),
        predicate
    );
    q
}

/// DELETE the row matching the key.
pub fn delete(spec: &TableSpec, key: Vec<SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let predicate = q.push_key_predicate(spec.key, key);
    q.sql = format!("DELETE FROM {} WHERE {}", quoted(spec.table), predicate);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Object, Record, Well, WellDayHistory};
    use chrono::NaiveDate;

    #[test]
    fn select_casts_every_column() {
        let q = select_all(Well::SPEC);
        assert_eq!(
            q.sql,
            "SELECT \"well\"::int4 AS \"well\", \"ngdu\"::int4 AS \"ngdu\", \"cdng\"::int4 AS \"cdng\", \
             \"kust\"::int4 AS \"kust\", \"mest\"::int4 AS \"mest\" FROM \"wells\""
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn insert_with_generated_key_skips_key_and_returns_it() {
        let q = insert(
            Object::SPEC,
            vec![SqlValue::Int(0)],
            vec![SqlValue::Text("pump station".into()), SqlValue::Int(2)],
        );
        assert_eq!(
            q.sql,
            "INSERT INTO \"objects\" (\"name\", \"type\") VALUES ($1, $2) RETURNING \"id\"::int4 AS \"id\""
        );
        assert_eq!(q.params, vec![SqlValue::Text("pump station".into()), SqlValue::Int(2)]);
    }

    #[test]
    fn insert_with_caller_key_writes_all_columns() {
        let q = insert(
            Well::SPEC,
            vec![SqlValue::Int(101)],
            vec![SqlValue::Int(1), SqlValue::Int(2), SqlValue::Int(3), SqlValue::Int(4)],
        );
        assert_eq!(
            q.sql,
            "INSERT INTO \"wells\" (\"well\", \"ngdu\", \"cdng\", \"kust\", \"mest\") VALUES ($1, $2, $3, $4, $5)"
        );
        assert_eq!(q.params[0], SqlValue::Int(101));
    }

    #[test]
    fn update_sets_values_then_matches_composite_key() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let q = update(
            WellDayHistory::SPEC,
            vec![SqlValue::Int(101), SqlValue::Date(date)],
            vec![
                SqlValue::Float(12.5),
                SqlValue::Float(3.1),
                SqlValue::Float(100.0),
                SqlValue::Float(22.0),
            ],
        );
        assert_eq!(
            q.sql,
            "UPDATE \"well_day_histories\" SET \"debit\" = $1, \"ee_consume\" = $2, \"expenses\" = $3, \
             \"pump_operating\" = $4 WHERE \"well\" = $5 AND \"date_fact\" = $6"
        );
        assert_eq!(q.params[4], SqlValue::Int(101));
        assert_eq!(q.params[5], SqlValue::Date(date));
    }

    #[test]
    fn delete_matches_key_only() {
        let q = delete(Object::SPEC, vec![SqlValue::Int(9)]);
        assert_eq!(q.sql, "DELETE FROM \"objects\" WHERE \"id\" = $1");
        assert_eq!(q.params, vec![SqlValue::Int(9)]);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted("a\"b"), "\"a\"\"b\"");
    }
}
