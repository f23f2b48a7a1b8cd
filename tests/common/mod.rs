//! Common test utilities: an in-memory record store and a server harness.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use oilfield_api::sql::SqlValue;
use oilfield_api::{app_router, AppError, AppState, RecordStore, TableSpec};

/// Store keeping rows per table in insertion order, with primary-key uniqueness.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Vec<SqlValue>>>>,
    next_id: Mutex<i32>,
    /// When set, every call fails with this message as a store error.
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn rows(&self, table: &str) -> Vec<Vec<SqlValue>> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    fn check(&self) -> Result<(), AppError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(AppError::Db(sqlx::Error::Protocol(message.clone()))),
            None => Ok(()),
        }
    }
}

fn matches_key(row: &[SqlValue], key: &[SqlValue]) -> bool {
    row.len() >= key.len() && row[..key.len()] == *key
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self, spec: &'static TableSpec) -> Result<Vec<Vec<SqlValue>>, AppError> {
        self.check()?;
        Ok(self.rows(spec.table))
    }

    async fn insert(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<Option<i32>, AppError> {
        self.check()?;
        let (key, generated) = if spec.generated_key {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            (vec![SqlValue::Int(*next)], Some(*next))
        } else {
            (key, None)
        };
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(spec.table).or_default();
        if rows.iter().any(|r| matches_key(r, &key)) {
            return Err(AppError::Db(sqlx::Error::Protocol(format!(
                "duplicate key value violates unique constraint \"{}_pkey\"",
                spec.table
            ))));
        }
        rows.push(key.into_iter().chain(values).collect());
        Ok(generated)
    }

    async fn update(
        &self,
        spec: &'static TableSpec,
        key: Vec<SqlValue>,
        values: Vec<SqlValue>,
    ) -> Result<u64, AppError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let mut affected = 0;
        for row in tables.entry(spec.table).or_default().iter_mut() {
            if matches_key(row, &key) {
                row.truncate(key.len());
                row.extend(values.iter().cloned());
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, spec: &'static TableSpec, key: Vec<SqlValue>) -> Result<u64, AppError> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(spec.table).or_default();
        let before = rows.len();
        rows.retain(|r| !matches_key(r, &key));
        Ok((before - rows.len()) as u64)
    }
}

/// Test harness: the full router over a fresh in-memory store.
pub struct TestHarness {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let state = AppState::new(store.clone());
        let server = TestServer::new(app_router(state, 1024 * 1024)).expect("Failed to create test server");
        Self { server, store }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
