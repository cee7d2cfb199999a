//! OpenAPI description of the HTTP surface.
//!
//! The document is always served as JSON; the interactive page at `/docs`
//! is compiled in only with the `swagger-ui` feature.

use axum::Router;
use utoipa::OpenApi;

use stockroom_catalog::{Category, NewCategory, NewProduct, NewSupplier, Product, Supplier};

use crate::app::dto::{ErrorBody, NotFoundBody};
use crate::app::routes::{categories, products, suppliers, system};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        description = "Catalog CRUD over categories, suppliers and products"
    ),
    paths(
        system::root,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::replace_category,
        categories::delete_category,
        suppliers::list_suppliers,
        suppliers::create_supplier,
        suppliers::get_supplier,
        suppliers::replace_supplier,
        suppliers::delete_supplier,
        products::list_products,
        products::create_product,
        products::get_product,
        products::replace_product,
        products::delete_product,
    ),
    components(schemas(
        Category,
        NewCategory,
        Supplier,
        NewSupplier,
        Product,
        NewProduct,
        ErrorBody,
        NotFoundBody,
    )),
    tags(
        (name = "system", description = "Greeting"),
        (name = "categories", description = "Product categories"),
        (name = "suppliers", description = "Suppliers"),
        (name = "products", description = "Catalog products"),
    )
)]
pub struct ApiDoc;

#[cfg(not(feature = "swagger-ui"))]
pub fn router() -> Router {
    use axum::{routing::get, Json};

    Router::new().route(OPENAPI_JSON_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}

/// Swagger UI serves the JSON document itself at the same path.
#[cfg(feature = "swagger-ui")]
pub fn router() -> Router {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
