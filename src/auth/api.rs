//! Authentication API Endpoints
//! Mission: Exchange the admin credential pair for a bearer token

use crate::auth::{
    jwt::JwtHandler,
    models::{AdminCredentials, LoginRequest, LoginResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub credentials: AdminCredentials,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(credentials: AdminCredentials, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            credentials,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.email);

    if !state.credentials.matches(&payload.email, &payload.password) {
        warn!("❌ Failed login attempt: {}", payload.email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let token = state
        .jwt_handler
        .issue_token()
        .map_err(|_| AuthApiError::InternalError)?;

    info!("✅ Login successful: {}", payload.email);

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // One message for wrong email and wrong password alike
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
