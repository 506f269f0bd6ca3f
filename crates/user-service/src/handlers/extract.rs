//! Request body extraction.

use crate::errors::UserServiceError;
use crate::models::Validate;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON object body that has been parsed and validated.
///
/// Any failure (wrong content type, invalid JSON, a top-level value that is
/// not an object, missing or mistyped fields, empty required strings) is
/// rejected as `MalformedRequest`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = UserServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| UserServiceError::MalformedRequest(rejection.body_text()))?;

        // Derived struct deserializers also accept arrays in field order
        if !raw.is_object() {
            return Err(UserServiceError::MalformedRequest(
                "request body must be a JSON object".to_string(),
            ));
        }

        let value: T = serde_json::from_value(raw)
            .map_err(|e| UserServiceError::MalformedRequest(e.to_string()))?;

        value.validate()?;

        Ok(Self(value))
    }
}
