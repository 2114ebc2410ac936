//! Authentication Module
//! Mission: Gate API access behind a single admin identity with JWT tokens

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::AdminCredentials;
