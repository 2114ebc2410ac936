//! Router Assembly
//! Mission: Wire public, auth, and protected routes into one service

use crate::applications::{api as applications_api, AppState};
use crate::auth::{api as auth_api, auth_middleware, AuthState, JwtHandler};
use crate::middleware::request_logging;
use axum::{
    middleware,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;

/// Create the full API router.
///
/// Everything under /api/applications sits behind the bearer-token
/// middleware; /health and /api/auth/login are public.
pub fn create_router(
    app_state: AppState,
    auth_state: AuthState,
    jwt_handler: Arc<JwtHandler>,
) -> Router {
    let auth_router = Router::new()
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state);

    // Collection routes registered with and without the trailing slash;
    // axum does not normalize them and clients use the slash form.
    let protected_routes = Router::new()
        .route(
            "/api/applications",
            get(applications_api::list_applications).post(applications_api::create_application),
        )
        .route(
            "/api/applications/",
            get(applications_api::list_applications).post(applications_api::create_application),
        )
        .route(
            "/api/applications/:id",
            patch(applications_api::update_application)
                .delete(applications_api::delete_application),
        )
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(app_state);

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging))
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
