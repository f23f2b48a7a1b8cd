//! Row storage behind the resource handlers, and its PostgreSQL implementation.
//!
//! Every call is one autocommit statement. Rows are key cells followed by value
//! cells, as laid out by the table descriptor.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::sql::{self, QueryBuf, SqlValue};
use crate::table::{ColumnKind, TableSpec};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every row of the table, in store order.
    async fn fetch_all(&self, spec: &'static TableSpec) -> Result<Vec<Vec<SqlValue>>, AppError>;

    /// Insert one row. Returns the generated key when the table has one.
    async fn insert(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<Option<i32>, AppError>;

    /// Overwrite the value columns of the row matching `key`. Returns affected row count.
    async fn update(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<u64, AppError>;

    /// Delete the row matching `key`. Returns affected row count.
    async fn delete(&self, spec: &'static TableSpec, key: Vec<SqlValue>) -> Result<u64, AppError>;
}

/// Store backed by a shared PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and ping it once; callers treat failure as fatal.
    pub async fn connect(options: PgConnectOptions, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(PgStore { pool })
    }

    fn prepare(q: &QueryBuf) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        query
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn fetch_all(&self, spec: &'static TableSpec) -> Result<Vec<Vec<SqlValue>>, AppError> {
        let q = sql::select_all(spec);
        let rows = Self::prepare(&q).fetch_all(&self.pool).await?;
        rows.iter().map(|row| decode_row(spec, row)).collect()
    }

    async fn insert(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<Option<i32>, AppError> {
        let q = sql::insert(spec, key, values);
        if spec.generated_key {
            let row = Self::prepare(&q).fetch_one(&self.pool).await?;
            Ok(Some(row.try_get::<i32, _>(0)?))
        } else {
            Self::prepare(&q).execute(&self.pool).await?;
            Ok(None)
        }
    }

    async fn update(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<u64, AppError> {
        let q = sql::update(spec, key, values);
        let done = Self::prepare(&q).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }

    async fn delete(&self, spec: &'static TableSpec, key: Vec<SqlValue>) -> Result<u64, AppError> {
        let q = sql::delete(spec, key);
        let done = Self::prepare(&q).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

fn decode_row(spec: &TableSpec, row: &PgRow) -> Result<Vec<SqlValue>, AppError> {
    spec.columns()
        .enumerate()
        .map(|(i, col)| -> Result<SqlValue, AppError> {
            Ok(match col.kind {
                ColumnKind::Int => SqlValue::Int(row.try_get(i)?),
                ColumnKind::Float => SqlValue::Float(row.try_get(i)?),
                ColumnKind::Text => SqlValue::Text(row.try_get(i)?),
                ColumnKind::Date => SqlValue::Date(row.try_get(i)?),
            })
        })
        .collect()
}
