//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use agri_advisor::{AdvisorError, AiTask, Coordinates, MarketPriceResult, WeatherSummary};
use agri_core::{InlineImage, ModelInfo, SessionId};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_connected: bool,
    pub weather_service: String,
}

#[derive(Debug, Serialize)]
pub struct TaskInfo {
    pub id: AiTask,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub task: AiTask,
    /// `data:<mime>;base64,<payload>`
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct MarketPriceRequest {
    pub crop: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub conversation_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

impl From<AdvisorError> for ErrorResponse {
    fn from(e: AdvisorError) -> Self {
        let code = match &e {
            AdvisorError::InvalidCoordinates { .. } => "INVALID_COORDINATES",
            AdvisorError::Weather(_) | AdvisorError::Network(_) | AdvisorError::Serialization(_) => {
                "WEATHER_UNAVAILABLE"
            }
            _ if e.is_client_error() => "INVALID_INPUT",
            _ => "MODEL_ERROR",
        };
        Self {
            error: e.user_message(),
            code: code.into(),
        }
    }
}

fn advisor_error(e: AdvisorError) -> ApiError {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    if status.is_server_error() {
        tracing::error!("Upstream failure: {}", e);
    }
    (status, Json(e.into()))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_connected,
        weather_service: state.weather.name().to_string(),
    })
}

pub async fn list_models(State(state): State<AppState>) -> Result<Json<Vec<ModelInfo>>, ApiError> {
    state.provider.list_models().await.map(Json).map_err(|e| {
        tracing::warn!("Model listing failed: {}", e);
        api_error(StatusCode::BAD_GATEWAY, e.user_message(), "MODEL_ERROR")
    })
}

pub async fn list_tasks() -> Json<Vec<TaskInfo>> {
    Json(
        AiTask::all()
            .into_iter()
            .map(|task| TaskInfo {
                id: task,
                title: task.title(),
                description: task.description(),
            })
            .collect(),
    )
}

/// Photo analysis for one of the AI tools
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let image = InlineImage::from_data_url(payload.image.as_deref().unwrap_or_default())
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.user_message(), "INVALID_IMAGE"))?;

    let result = state
        .analyzer
        .analyze_or_apologize(payload.task, image)
        .await
        .map_err(advisor_error)?;

    Ok(Json(AnalyzeResponse { result }))
}

pub async fn market_price(
    State(state): State<AppState>,
    Json(payload): Json<MarketPriceRequest>,
) -> Result<Json<MarketPriceResult>, ApiError> {
    state
        .market
        .lookup(&payload.crop)
        .await
        .map(Json)
        .map_err(advisor_error)
}

pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSummary>, ApiError> {
    let at = Coordinates::new(query.lat, query.lon).map_err(advisor_error)?;
    state.weather.summary(at).await.map(Json).map_err(advisor_error)
}

/// One chat turn
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let conversation_id = payload
        .conversation_id
        .filter(|id| !id.trim().is_empty())
        .map(SessionId::from_string);

    let reply = state
        .chat
        .reply(conversation_id, &payload.message)
        .await
        .map_err(advisor_error)?;

    Ok(Json(ChatResponse {
        message: reply.message,
        conversation_id: reply.conversation_id.to_string(),
    }))
}

/// Forget a conversation's history
pub async fn end_chat(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .chat
        .end(&SessionId::from_string(conversation_id))
        .await
        .map_err(advisor_error)?;
    Ok(StatusCode::NO_CONTENT)
}
