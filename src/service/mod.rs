//! Resource logic between HTTP handlers and the record store.

pub mod crud;
pub use crud::*;
