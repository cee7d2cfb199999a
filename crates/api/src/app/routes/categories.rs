use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Router,
};

use stockroom_catalog::{Category, NewCategory};
use stockroom_core::CategoryId;

use crate::app::dto::{ErrorBody, NotFoundBody, ValidatedJson};
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(replace_category).delete(delete_category),
        )
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "All categories", body = [Category]))
)]
pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    common::respond(StatusCode::OK, services.store().list_categories().await)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid body", body = ErrorBody)
    )
)]
pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    ValidatedJson(body): ValidatedJson<NewCategory>,
) -> axum::response::Response {
    common::respond(StatusCode::CREATED, services.store().create_category(body).await)
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "No such category", body = NotFoundBody)
    )
)]
pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().get_category(id).await)
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = NewCategory,
    responses(
        (status = 200, description = "The category after replacement", body = Category),
        (status = 400, description = "Invalid body or id", body = ErrorBody),
        (status = 404, description = "No such category", body = NotFoundBody)
    )
)]
pub async fn replace_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<NewCategory>,
) -> axum::response::Response {
    let id: CategoryId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().replace_category(id, body).await)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 204, description = "Deleted, or was already absent"),
        (status = 409, description = "Still referenced by a product", body = ErrorBody)
    )
)]
pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::no_content(services.store().delete_category(id).await)
}
