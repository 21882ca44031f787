use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post, put};
use common::config::CONFIG;
use common::persistence::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

pub mod auth;
pub mod domain;
pub mod error;
pub mod routes;

#[derive(OpenApi)]
#[openapi(paths(
    crate::routes::auth::register,
    crate::routes::auth::login,
    crate::routes::oem::list,
    crate::routes::oem::search,
    crate::routes::oem::count,
    crate::routes::inventory::list,
    crate::routes::inventory::create,
    crate::routes::inventory::update,
    crate::routes::inventory::remove,
    crate::routes::inventory::bulk_remove,
))]
pub struct Docs;

pub fn router(pool: PgPool) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    axum::Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/oem/list", get(routes::oem::list))
        .route("/oem/search", get(routes::oem::search))
        .route("/oem/count", get(routes::oem::count))
        .route(
            "/inventory",
            get(routes::inventory::list).post(routes::inventory::create),
        )
        .route(
            "/inventory/{id}",
            put(routes::inventory::update).delete(routes::inventory::remove),
        )
        .route("/inventory/bulk-delete", post(routes::inventory::bulk_remove))
        .nest_service("/uploads", ServeDir::new(&CONFIG.uploads.dir))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(cors)
        .with_state(pool)
}
