//! AgriGuru HTTP Server
//!
//! Axum server for the JSON API used by the web front-end, and the static
//! files of the front-end itself.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agri_advisor::{OpenMeteoClient, WeatherClient};
use agri_core::LlmProvider;
use agri_runtime::GeminiProvider;

use crate::handlers::{
    analyze_image, chat_handler, end_chat, health_check, list_models, list_tasks, market_price,
    weather,
};
use crate::state::{AppState, ServerConfig};

/// API routes plus the static front-end
fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/tasks", get(list_tasks))
        // Advisor API
        .route("/api/analyze", post(analyze_image))
        .route("/api/market-price", post(market_price))
        .route("/api/weather", get(weather))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/{conversation_id}", delete(end_chat))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    let gemini = GeminiProvider::from_env().map_err(|e| {
        anyhow::anyhow!("{e}. Set GEMINI_API_KEY (or API_KEY) in the environment or .env")
    })?;
    let model = gemini.config().default_model.clone();
    let provider: Arc<dyn LlmProvider> = Arc::new(gemini);

    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Gemini (model: {})", model);
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Gemini not reachable - AI features will answer with fallbacks");
        }
    }

    let weather: Arc<dyn WeatherClient> = Arc::new(OpenMeteoClient::from_env()?);
    tracing::info!("Weather source: {}", weather.name());

    let state = AppState::new(provider, weather, &model);
    let app = router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("🌾 AgriGuru server running on http://{}", config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/models        - List available models");
    tracing::info!("  GET  /api/tasks         - Image analysis tools");
    tracing::info!("  POST /api/analyze       - Analyze a crop/soil photo");
    tracing::info!("  POST /api/market-price  - Market prices for a crop");
    tracing::info!("  GET  /api/weather       - Current weather at lat/lon");
    tracing::info!("  POST /api/chat          - Chat with AgriGuru");
    tracing::info!("  DELETE /api/chat/:id    - End a conversation");

    axum::serve(listener, app).await?;

    Ok(())
}
