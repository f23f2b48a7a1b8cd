//! HTTP handlers for the record resources and the API description.

pub mod docs;
pub mod resource;
pub use resource::*;
