//! Generic CRUD over any record kind: one statement per call.

use crate::error::AppError;
use crate::models::Record;
use crate::sql::SqlValue;
use crate::store::RecordStore;

pub struct CrudService;

impl CrudService {
    /// Every record of the kind, in store order.
    pub async fn list<R: Record>(store: &dyn RecordStore) -> Result<Vec<R>, AppError> {
        let rows = store.fetch_all(R::SPEC).await?;
        rows.into_iter().map(R::from_row).collect()
    }

    /// Insert one record. Returns it with any store-generated key merged in.
    pub async fn create<R: Record>(store: &dyn RecordStore, mut record: R) -> Result<R, AppError> {
        if let Some(id) = store.insert(R::SPEC, record.key(), record.values()).await? {
            record.set_generated_key(id);
        }
        Ok(record)
    }

    /// Replace every value column of the record with the same key.
    pub async fn update<R: Record>(store: &dyn RecordStore, record: R) -> Result<R, AppError> {
        let affected = store.update(R::SPEC, record.key(), record.values()).await?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(record)
    }

    /// Delete the record with the given key cells.
    pub async fn delete<R: Record>(store: &dyn RecordStore, key: Vec<SqlValue>) -> Result<(), AppError> {
        let affected = store.delete(R::SPEC, key).await?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
