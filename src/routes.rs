use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        admin::{admin_auth_handler, dashboard_handler},
        auth::auth_handler,
        bookings::bookings_handler,
        professionals::professionals_handler,
        services::{issues_handler, services_handler},
    },
    middleware::{admin_only, auth},
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/services", services_handler())
        .nest("/issues", issues_handler())
        .nest("/professionals", professionals_handler())
        .nest(
            "/bookings",
            bookings_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/admin/auth",
            admin_auth_handler()
                .layer(middleware::from_fn(admin_only))
                .layer(middleware::from_fn(auth)),
        )
        .nest(
            "/admin/dashboard",
            dashboard_handler()
                .layer(middleware::from_fn(admin_only))
                .layer(middleware::from_fn(auth)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
