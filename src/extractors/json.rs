//! JSON request body that rejects with 400 and the decoder's message.
//!
//! Unlike `axum::Json` this ignores `Content-Type` and reports type mismatches
//! as bad requests rather than 422. A literal `null` body decodes to the
//! zero-value record.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Body(e.status(), e.body_text()))?;
        let value: Option<T> =
            serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(JsonBody(value.unwrap_or_default()))
    }
}
