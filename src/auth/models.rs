//! Authentication Models
//! Mission: Define the admin identity and token data structures

use serde::{Deserialize, Serialize};

/// Role name embedded in admin tokens.
pub const ADMIN_ROLE: &str = "admin";

/// The single configured admin identity, compared by exact string equality.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    /// Check a supplied credential pair against the configured identity.
    ///
    /// Deliberately gives no hint whether the email or the password was
    /// wrong; callers surface one error for both cases.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        email == self.email && password == self.password
    }
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // subject (admin email)
    pub role: String, // always "admin" for issued tokens
    pub exp: usize,   // expiration timestamp
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String, // always "bearer"
}
