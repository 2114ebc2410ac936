//! Apptrack Backend Library
//!
//! Exposes core modules for use by the binary and integration tests.

pub mod applications;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod router;
