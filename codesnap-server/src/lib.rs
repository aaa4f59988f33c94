use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use codesnap_exec::{CodeExecutionService, ExecutionConfig, ExecutionResult};
use codesnap_tutor::{Explanation, TutorClient, TutorConfig};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

pub mod report;

use report::{render_markdown, report_filename, ReportRequest};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Execution setup error: {0}")]
    ExecutionError(#[from] codesnap_exec::Error),
    #[error("Tutor setup error: {0}")]
    TutorError(#[from] codesnap_tutor::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::ExecutionError(_) | ServerError::TutorError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunRequest {
    pub language: String,
    pub code: String,
    pub input: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExplainRequest {
    pub language: String,
    pub code: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TutorRequest {
    pub message: String,
    #[serde(default = "default_tutor_language")]
    pub language: String,
}

fn default_tutor_language() -> String {
    "general".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TutorResponse {
    pub reply: String,
}

#[derive(Clone)]
pub struct AppState {
    pub service: CodeExecutionService,
    pub tutor: TutorClient,
}

impl AppState {
    pub fn new(config: ExecutionConfig, tutor_config: TutorConfig) -> Result<Self, ServerError> {
        Ok(Self {
            service: CodeExecutionService::new(config)?,
            tutor: TutorClient::new(tutor_config)?,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/run", post(run))
        .route("/api/explain", post(explain))
        .route("/api/tutor", post(tutor))
        .route("/api/report/download", post(download_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting CodeSnap server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "CodeSnap Backend is running" }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Always answers 200; failures travel in the `error` field.
async fn run(State(state): State<AppState>, Json(payload): Json<RunRequest>) -> Json<ExecutionResult> {
    let result = state
        .service
        .execute(&payload.language, &payload.code, payload.input.as_deref())
        .await;
    Json(result)
}

async fn explain(
    State(state): State<AppState>,
    Json(payload): Json<ExplainRequest>,
) -> Json<Explanation> {
    let error = payload.error.unwrap_or_default();
    Json(
        state
            .tutor
            .explain(&payload.language, &payload.code, &error)
            .await,
    )
}

async fn tutor(
    State(state): State<AppState>,
    Json(payload): Json<TutorRequest>,
) -> Json<TutorResponse> {
    let reply = state.tutor.tutor(&payload.message, &payload.language).await;
    Json(TutorResponse { reply })
}

async fn download_report(Json(payload): Json<ReportRequest>) -> impl IntoResponse {
    let now = Local::now();
    let filename = report_filename(&now);
    let markdown = render_markdown(&payload, &now);
    debug!("Generated report {} ({} bytes)", filename, markdown.len());

    (
        [
            (header::CONTENT_TYPE, "text/markdown".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        markdown,
    )
}
