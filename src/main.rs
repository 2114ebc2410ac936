//! Apptrack Backend
//! Mission: Minimal job-application tracker API with a single admin identity

use anyhow::{Context, Result};
use apptrack_backend::{
    applications::{AppState, ApplicationStore},
    auth::{AuthState, JwtHandler},
    config::Config,
    router::create_router,
};
use axum::http::HeaderValue;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    info!("🚀 Apptrack API starting");

    let config = Config::from_env();

    let store = Arc::new(ApplicationStore::new(&config.db_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(
        config.jwt_secret.clone(),
        config.jwt_expire_minutes,
        config.admin.email.clone(),
    ));

    let app_state = AppState {
        store: store.clone(),
    };
    let auth_state = AuthState::new(config.admin.clone(), jwt_handler.clone());

    info!("🔐 Auth configured for {}", config.admin.email);

    let app = create_router(app_state, auth_state, jwt_handler)
        .layer(build_cors(&config.cors_origins));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build a CORS layer from the configured origin list.
fn build_cors(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Initialize tracing with env-filter overrides.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apptrack_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the manifest directory (common when running with
    //    --manifest-path from elsewhere)
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let candidate = manifest_dir.join(".env");
    if candidate.exists() {
        let _ = dotenv::from_path(&candidate);
    }
}
