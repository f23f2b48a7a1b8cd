//! Typed values carried between records, SQL parameters and decoded rows.

use chrono::NaiveDate;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

use crate::error::AppError;

/// One cell of a row. Binds to PostgreSQL with the type of its variant.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl SqlValue {
    pub fn as_int(&self) -> Result<i32, AppError> {
        match self {
            SqlValue::Int(n) => Ok(*n),
            other => Err(mismatch("integer", other)),
        }
    }

    pub fn as_float(&self) -> Result<f64, AppError> {
        match self {
            SqlValue::Float(n) => Ok(*n),
            other => Err(mismatch("float", other)),
        }
    }

    pub fn as_text(&self) -> Result<&str, AppError> {
        match self {
            SqlValue::Text(s) => Ok(s),
            other => Err(mismatch("text", other)),
        }
    }

    pub fn as_date(&self) -> Result<NaiveDate, AppError> {
        match self {
            SqlValue::Date(d) => Ok(*d),
            other => Err(mismatch("date", other)),
        }
    }
}

fn mismatch(expected: &str, got: &SqlValue) -> AppError {
    AppError::Decode(format!("expected {} cell, got {:?}", expected, got))
}

impl<'q> Encode<'q, Postgres> for SqlValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            SqlValue::Int(n) => <i32 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlValue::Float(n) => <f64 as Encode<Postgres>>::encode_by_ref(n, buf),
            SqlValue::Text(s) => <String as Encode<Postgres>>::encode_by_ref(s, buf),
            SqlValue::Date(d) => <NaiveDate as Encode<Postgres>>::encode_by_ref(d, buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            SqlValue::Int(_) => <i32 as Type<Postgres>>::type_info(),
            SqlValue::Float(_) => <f64 as Type<Postgres>>::type_info(),
            SqlValue::Text(_) => <String as Type<Postgres>>::type_info(),
            SqlValue::Date(_) => <NaiveDate as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for SqlValue {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("TEXT")
    }
}
