//! Response helpers shared by the entity handlers.

use std::str::FromStr;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use stockroom_core::DomainError;
use stockroom_infra::StoreResult;

use crate::app::errors;

/// Parse a path id, answering 400 on failure.
pub fn parse_id<I>(raw: &str) -> Result<I, axum::response::Response>
where
    I: FromStr<Err = DomainError>,
{
    raw.parse::<I>().map_err(errors::domain_error_to_response)
}

/// `status` + JSON body on success.
pub fn respond<T: Serialize>(status: StatusCode, res: StoreResult<T>) -> axum::response::Response {
    match res {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// 200 with the row, or the fixed 404 when there is none.
pub fn found<T: Serialize>(res: StoreResult<Option<T>>) -> axum::response::Response {
    match res {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => errors::not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// 204 with an empty body.
pub fn no_content(res: StoreResult<()>) -> axum::response::Response {
    match res {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
