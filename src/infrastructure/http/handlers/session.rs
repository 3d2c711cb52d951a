//! Session Handlers - 会话生命周期与翻页

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    CloseSessionCommand, NavigateCommand, NavigationTarget, OpenSessionCommand,
};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Open
// ============================================================================

#[derive(Debug, Serialize)]
pub struct OpenSessionResponseDto {
    pub session_id: String,
}

pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<OpenSessionResponseDto>>, ApiError> {
    let result = state.open_session_handler.handle(OpenSessionCommand).await?;

    Ok(Json(ApiResponse::success(OpenSessionResponseDto {
        session_id: result.session_id,
    })))
}

// ============================================================================
// Close
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CloseSessionRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct CloseSessionResponseDto {
    pub session_id: String,
}

pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CloseSessionRequest>,
) -> Result<Json<ApiResponse<CloseSessionResponseDto>>, ApiError> {
    let cmd = CloseSessionCommand {
        session_id: req.session_id,
    };

    let result = state.close_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(CloseSessionResponseDto {
        session_id: result.session_id,
    })))
}

// ============================================================================
// Navigate (prev / next / goto)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GotoChapterRequest {
    pub session_id: String,
    pub chapter_index: usize,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponseDto {
    pub session_id: String,
    pub current_chapter: usize,
    pub chapter_count: usize,
}

async fn navigate(
    state: Arc<AppState>,
    session_id: String,
    target: NavigationTarget,
) -> Result<Json<ApiResponse<NavigateResponseDto>>, ApiError> {
    let cmd = NavigateCommand { session_id, target };

    let result = state.navigate_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(NavigateResponseDto {
        session_id: result.session_id,
        current_chapter: result.current_chapter,
        chapter_count: result.chapter_count,
    })))
}

pub async fn previous_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<NavigateResponseDto>>, ApiError> {
    navigate(state, req.session_id, NavigationTarget::Previous).await
}

pub async fn next_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<NavigateResponseDto>>, ApiError> {
    navigate(state, req.session_id, NavigationTarget::Next).await
}

pub async fn goto_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GotoChapterRequest>,
) -> Result<Json<ApiResponse<NavigateResponseDto>>, ApiError> {
    navigate(
        state,
        req.session_id,
        NavigationTarget::Chapter(req.chapter_index),
    )
    .await
}
