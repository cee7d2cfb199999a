use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use utoipa::ToSchema;

use stockroom_catalog::Validate;

use crate::app::errors;

// -------------------------
// Request extraction
// -------------------------

/// JSON body that has passed both deserialization and its `FieldRule` table.
///
/// Any failure (bad content type, malformed JSON, wrong field types, rule
/// violations) is answered with 400 before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                rejection.body_text(),
            )
        })?;
        value.validate().map_err(errors::domain_error_to_response)?;
        Ok(Self(value))
    }
}

// -------------------------
// Response bodies
// -------------------------

/// Error payload for every non-404 failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code, e.g. `constraint_violation`.
    pub error: String,
    pub message: String,
}

/// Payload of a 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotFoundBody {
    #[schema(example = "Not found")]
    pub message: String,
}
