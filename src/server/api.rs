//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::SecondsFormat;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::core::client::RelayClient;
use crate::core::config::RelayConfig;
use crate::core::errors::RelayError;
use crate::core::models::{
    EndpointInfo, ErrorResponse, HealthResponse, ServiceInfo, TranslationRequest,
    TranslationResponse, MISSING_TEXT_MESSAGE,
};
use crate::server::cors::cors_layer;

/// Application state
#[derive(Clone)]
pub struct AppState {
    relay: RelayClient,
}

impl AppState {
    pub fn new(config: Arc<RelayConfig>) -> anyhow::Result<Self> {
        Ok(Self {
            relay: RelayClient::new(config)?,
        })
    }

    fn config(&self) -> &RelayConfig {
        self.relay.config()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Service descriptor handler
async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    let endpoint = |method: &str, path: &str, description: &str| EndpointInfo {
        method: method.to_string(),
        path: path.to_string(),
        description: description.to_string(),
    };

    Json(ServiceInfo {
        name: "Ibani Translator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config().model_id.clone(),
        endpoints: vec![
            endpoint("GET", "/", "Service information"),
            endpoint("GET", "/health", "Readiness probe"),
            endpoint("POST", "/api/translate", "Translate English text to Ibani"),
        ],
    })
}

/// Health check handler
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = state.config();
    Json(HealthResponse {
        status: "UP".to_string(),
        model: config.model_id.clone(),
        timestamp: chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        using_custom_inference: config.uses_custom_inference(),
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TranslationResponse>, RelayError> {
    let request = match payload {
        Ok(Json(body)) => TranslationRequest::from_value(&body),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection);
            Err(RelayError::Validation {
                message: MISSING_TEXT_MESSAGE.to_string(),
            })
        }
    }?;

    match state.relay.translate(&request.text).await {
        Ok(translated) => Ok(Json(TranslationResponse::new(request.text, translated))),
        Err(e) => {
            error!("Translation Error: {}", e);
            Err(e)
        }
    }
}

/// Build the router with CORS and request tracing
pub fn create_router(config: Arc<RelayConfig>) -> anyhow::Result<Router> {
    let cors = cors_layer(&config.allowed_origins)?;
    let state = Arc::new(AppState::new(config)?);

    Ok(Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/api/translate", post(translate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the HTTP server
pub async fn run_server(config: RelayConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_router(Arc::new(config))?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
