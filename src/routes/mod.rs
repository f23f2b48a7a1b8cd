//! Route table: one path per record kind, plus the API description.

pub mod resource;
pub use resource::*;
