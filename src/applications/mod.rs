//! Applications Module
//! Mission: The single tracked entity and its storage + HTTP surface

pub mod api;
pub mod models;
pub mod store;

pub use api::AppState;
pub use models::Application;
pub use store::ApplicationStore;
