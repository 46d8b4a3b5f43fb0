use crate::core::registry::ModelRegistry;
use crate::domain::forms::FieldSpec;
use crate::domain::model::{Diagnosis, Disease, RawInputSet};
use crate::utils::error::{PredictError, Result};
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 表單欄位值，接受字串或數字；null、布林、陣列、物件一律視為無效欄位
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Other(serde_json::Value),
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
            // 空字串無法轉換，交給 infer 回報為 InputValidation
            FieldValue::Other(_) => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub values: Vec<FieldValue>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub diagnosis: Diagnosis,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_fields: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub disease: Disease,
    pub title: &'static str,
    pub available: bool,
    pub reason: Option<String>,
    pub fields: &'static [FieldSpec],
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = match &self {
            PredictError::InputValidation { .. }
            | PredictError::FieldCount { .. }
            | PredictError::ModelInvocation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PredictError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PredictError::UnknownDisease { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let invalid_fields = match &self {
            PredictError::InputValidation { invalid_fields } => invalid_fields.clone(),
            _ => Vec::new(),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            category: self.kind(),
            invalid_fields,
        };

        (status, Json(body)).into_response()
    }
}

pub fn router(registry: Arc<ModelRegistry>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/models", get(models))
        .route("/predict/{disease}", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(registry)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn models(State(registry): State<Arc<ModelRegistry>>) -> Json<Vec<ModelInfo>> {
    let infos = registry
        .status()
        .into_iter()
        .map(|status| ModelInfo {
            disease: status.disease,
            title: status.title,
            available: status.available,
            reason: status.reason,
            fields: status.disease.fields(),
        })
        .collect();
    Json(infos)
}

async fn predict(
    State(registry): State<Arc<ModelRegistry>>,
    Path(disease): Path<String>,
    Json(request): Json<PredictRequest>,
) -> std::result::Result<Json<PredictResponse>, PredictError> {
    let disease: Disease = disease.parse()?;
    let raw: RawInputSet = request.values.into_iter().collect();

    let diagnosis = registry.diagnose(disease, &raw).map_err(|e| {
        tracing::warn!("Prediction for {} failed: {}", disease, e);
        e
    })?;

    Ok(Json(PredictResponse {
        diagnosis,
        evaluated_at: Utc::now(),
    }))
}

/// 啟動 HTTP 服務，收到 Ctrl-C 後結束
pub async fn serve(registry: Arc<ModelRegistry>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
