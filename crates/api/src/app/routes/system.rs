use axum::http::StatusCode;

/// Greeting served at `/`.
pub const GREETING: &str = "Hello Stockroom!";

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Fixed greeting", body = String, content_type = "text/plain")
    )
)]
pub async fn root() -> &'static str {
    GREETING
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
