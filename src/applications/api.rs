//! Application API Endpoints
//! Mission: CRUD over application records, behind the auth middleware

use crate::applications::{
    models::{Application, ApplicationCreate, ApplicationUpdate},
    store::ApplicationStore,
};
use crate::auth::models::Claims;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ApplicationStore>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact status match
    pub status: Option<String>,
    /// Case-insensitive substring match on company
    pub company: Option<String>,
}

/// List applications with optional filters - GET /api/applications/
pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<Application>>, ApiError> {
    // An empty query value (?status=) means "no filter", not "match empty"
    let status = params.status.as_deref().filter(|s| !s.is_empty());
    let company = params.company.as_deref().filter(|s| !s.is_empty());

    let apps = state.store.list(status, company)?;

    Ok(Json(apps))
}

/// Create an application - POST /api/applications/
pub async fn create_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ApplicationCreate>,
) -> Result<Json<Application>, ApiError> {
    let created = state.store.create(&payload)?;
    debug!("Application #{} created by {}", created.id, claims.sub);

    Ok(Json(created))
}

/// Partially update an application - PATCH /api/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<ApplicationUpdate>,
) -> Result<Json<Application>, ApiError> {
    let updated = state
        .store
        .update(id, &payload)?
        .ok_or(ApiError::NotFound("Application not found".to_string()))?;
    debug!("Application #{} updated by {}", id, claims.sub);

    Ok(Json(updated))
}

/// Delete an application - DELETE /api/applications/:id
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete(id)? {
        return Err(ApiError::NotFound("Application not found".to_string()));
    }
    debug!("Application #{} deleted by {}", id, claims.sub);

    Ok(Json(json!({ "deleted": true })))
}

/// API errors for the application routes
#[derive(Debug)]
pub enum ApiError {
    Database(anyhow::Error),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
