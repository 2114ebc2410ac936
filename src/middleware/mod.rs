//! HTTP Middleware
//! Mission: Cross-cutting request concerns (logging)

pub mod logging;

pub use logging::request_logging;
