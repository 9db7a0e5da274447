use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, system, AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A030 Sales records
        .route(
            "/api/sales",
            get(handlers::a030_sales_record::list).post(handlers::a030_sales_record::create),
        )
        // D410 Sales insights dashboard
        .route(
            "/api/d410/insights",
            get(handlers::d410_sales_insights::get_insights),
        )
        .layer(middleware::from_fn(system::middleware::request_logger))
        .layer(cors)
        .with_state(state)
}
