//! Oilfield records API: REST over PostgreSQL for objects, wells, daily well history and plans.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod table;

pub use config::ServiceConfig;
pub use error::AppError;
pub use models::{Object, Record, Well, WellDayHistory, WellDayPlan};
pub use routes::{app_router, resource_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{PgStore, RecordStore};
pub use table::{Column, ColumnKind, TableSpec};
