use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Router,
};

use stockroom_catalog::{NewProduct, Product};
use stockroom_core::ProductId;

use crate::app::dto::{ErrorBody, NotFoundBody, ValidatedJson};
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(replace_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses((status = 200, description = "All products", body = [Product]))
)]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    common::respond(StatusCode::OK, services.store().list_products().await)
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 409, description = "Duplicate sku or unknown category/supplier", body = ErrorBody)
    )
)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    ValidatedJson(body): ValidatedJson<NewProduct>,
) -> axum::response::Response {
    common::respond(StatusCode::CREATED, services.store().create_product(body).await)
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No such product", body = NotFoundBody)
    )
)]
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().get_product(id).await)
}

/// `created_at` is kept from the original row.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = NewProduct,
    responses(
        (status = 200, description = "The product after replacement", body = Product),
        (status = 400, description = "Invalid body or id", body = ErrorBody),
        (status = 404, description = "No such product", body = NotFoundBody),
        (status = 409, description = "Duplicate sku or unknown category/supplier", body = ErrorBody)
    )
)]
pub async fn replace_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<NewProduct>,
) -> axum::response::Response {
    let id: ProductId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::found(services.store().replace_product(id, body).await)
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted, or was already absent"),
        (status = 409, description = "Still referenced by inventory or an order item",
            body = ErrorBody)
    )
)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    common::no_content(services.store().delete_product(id).await)
}
