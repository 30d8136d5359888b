//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, CreateSessionResponse, ErrorResponse, ModelsResponse,
    SuccessResponse,
};
use super::AppState;
use crate::mood::{BreathingExercise, BREATHING_EXERCISE};
use crate::runtime::{SessionController, SessionSnapshot};
use crate::state_machine::TransitionError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_index))
        .route("/assets/*path", get(serve_static))
        // Session lifecycle
        .route("/api/sessions/new", post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/delete", post(delete_session))
        // User actions
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/clear", post(clear_session))
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // Static content
        .route("/api/breathing", get(get_breathing))
        .route("/api/models", get(list_models))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_index() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session = state.sessions.create_session().await;
    Json(CreateSessionResponse {
        session_id: session.session_id().to_string(),
    })
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = find_session(&state, &id).await?;
    Ok(Json(session.snapshot()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    if state.sessions.remove(&id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(session_not_found(&id))
    }
}

async fn find_session(state: &AppState, id: &str) -> Result<Arc<SessionController>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))
}

fn session_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Session not found: {id}"))
}

// ============================================================
// User Actions
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = find_session(&state, &id).await?;

    // The turn runs on its own task so a dropped client connection cannot
    // abandon it halfway
    let turn = tokio::spawn(async move { session.submit(&req.text).await })
        .await
        .map_err(|e| AppError::Internal(format!("Chat task failed: {e}")))??;

    Ok(Json(ChatResponse {
        user: turn.user,
        reply: turn.reply,
    }))
}

async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session = find_session(&state, &id).await?;
    session.clear()?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = find_session(&state, &id).await?;
    // Subscribe before taking the snapshot so no event falls in between
    let rx = session.subscribe();
    Ok(sse_stream(session.snapshot(), rx).into_response())
}

// ============================================================
// Static Content
// ============================================================

async fn get_breathing() -> Json<BreathingExercise> {
    Json(BREATHING_EXERCISE)
}

async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.llm_registry.available_model_info(),
        default: state.llm_registry.default_model_id().to_string(),
    })
}

async fn get_version() -> &'static str {
    concat!("mindmate ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Busy => AppError::Conflict(err.to_string()),
            TransitionError::EmptyMessage => AppError::BadRequest(err.to_string()),
            TransitionError::InvalidTransition(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
