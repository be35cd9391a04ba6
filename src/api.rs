use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::engine::{self, ResultRow};
use crate::loader::{csv_loader, excel_loader};
use crate::tables::WeatherTables;

/// Each request answers against an immutable table snapshot: either the one
/// preloaded at startup, or the tables uploaded with the request. No request
/// ever mutates shared state.
#[derive(Clone, Default)]
pub struct AppState {
    pub tables: Option<Arc<WeatherTables>>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub table: Vec<ResultRow>,
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/ask/upload", post(ask_upload))
        .with_state(state);

    Router::new().nest("/api/v1", api_routes)
}

#[instrument(skip(_state))]
async fn health(State(_state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

/// Answer a question against the preloaded table snapshot.
#[instrument(skip(state, request))]
async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    let tables = state.tables.clone().ok_or_else(|| {
        warn!("No dataset preloaded; set WORKBOOK_PATH or use /ask/upload");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    debug!("Answering question: {:?}", request.question);
    let result = engine::answer(&request.question, &tables);

    info!("Answered question with {} result rows", result.table.len());
    Ok(Json(AskResponse {
        answer: result.text,
        table: result.table,
    }))
}

/// Answer a question against tables uploaded with the request.
///
/// Multipart fields: `question` (required), plus either `workbook` (an xlsx
/// file with Daily/Monthly sheets) or the `daily` and `monthly` CSV files.
#[instrument(skip(multipart))]
async fn ask_upload(mut multipart: Multipart) -> Result<Json<AskResponse>, StatusCode> {
    let mut question: Option<String> = None;
    let mut workbook: Option<Vec<u8>> = None;
    let mut daily_csv: Option<Vec<u8>> = None;
    let mut monthly_csv: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        StatusCode::BAD_REQUEST
    })? {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("question") => {
                question = Some(field.text().await.map_err(|e| {
                    error!("Failed to read question field: {}", e);
                    StatusCode::BAD_REQUEST
                })?);
            }
            Some("workbook") => {
                workbook = Some(read_file_field(field, "workbook").await?);
            }
            Some("daily") => {
                daily_csv = Some(read_file_field(field, "daily").await?);
            }
            Some("monthly") => {
                monthly_csv = Some(read_file_field(field, "monthly").await?);
            }
            other => {
                debug!("Ignoring unexpected multipart field: {:?}", other);
            }
        }
    }

    let question = question.ok_or_else(|| {
        warn!("Upload request without a question field");
        StatusCode::BAD_REQUEST
    })?;

    let tables = match (workbook, daily_csv, monthly_csv) {
        (Some(bytes), _, _) => {
            // Workbook parsing is blocking work
            tokio::task::spawn_blocking(move || excel_loader::load_workbook_bytes(bytes))
                .await
                .map_err(|e| {
                    error!("Workbook parsing task failed: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                })?
                .map_err(|e| {
                    warn!("Failed to parse uploaded workbook: {}", e);
                    StatusCode::UNPROCESSABLE_ENTITY
                })?
        }
        (None, Some(daily), Some(monthly)) => csv_loader::load_csv_pair_bytes(&daily, &monthly)
            .map_err(|e| {
                warn!("Failed to parse uploaded CSV tables: {}", e);
                StatusCode::UNPROCESSABLE_ENTITY
            })?,
        _ => {
            warn!("Upload request without workbook or daily+monthly CSV files");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let result = engine::answer(&question, &tables);

    info!(
        "Answered uploaded question with {} result rows",
        result.table.len()
    );
    Ok(Json(AskResponse {
        answer: result.text,
        table: result.table,
    }))
}

async fn read_file_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<Vec<u8>, StatusCode> {
    field
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| {
            error!("Failed to read {} field: {}", name, e);
            StatusCode::BAD_REQUEST
        })
}
