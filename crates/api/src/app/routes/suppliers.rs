use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Router,
};

use stockroom_catalog::{NewSupplier, Supplier};
use stockroom_core::SupplierId;

use crate::app::dto::{ErrorBody, NotFoundBody, ValidatedJson};
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier).put(replace_supplier).delete(delete_supplier),
        )
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "suppliers",
    responses((status = 200, description = "All suppliers", body = [Supplier]))
)]
pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    common::respond(StatusCode::OK, services.store().list_suppliers().await)
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "suppliers",
    request_body = NewSupplier,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    ValidatedJson(body): ValidatedJson<NewSupplier>,
) -> axum::response::Response {
    common::respond(StatusCode::CREATED, services.store().create_supplier(body).await)
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "The supplier", body = Supplier),
        (status = 404, description = "No such supplier", body = NotFoundBody)
    )
)]
pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().get_supplier(id).await)
}

/// Optional fields omitted from the body are cleared, not kept.
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    request_body = NewSupplier,
    responses(
        (status = 200, description = "The supplier after replacement", body = Supplier),
        (status = 400, description = "Invalid body or id", body = ErrorBody),
        (status = 404, description = "No such supplier", body = NotFoundBody)
    )
)]
pub async fn replace_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<NewSupplier>,
) -> axum::response::Response {
    let id: SupplierId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().replace_supplier(id, body).await)
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "suppliers",
    params(("id" = i32, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Deleted, or was already absent"),
        (status = 409, description = "Still referenced by a product", body = ErrorBody)
    )
)]
pub async fn delete_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::no_content(services.store().delete_supplier(id).await)
}
