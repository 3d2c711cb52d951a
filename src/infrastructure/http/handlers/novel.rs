//! Novel Handlers - 生成、概览、章节内容、下载

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{DownloadNovel, GenerateNovelCommand, GetChapter, GetNovel};
use crate::domain::Genre;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Generate
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateNovelRequest {
    pub session_id: String,
    pub genre: Genre,
    #[serde(default)]
    pub user_prompt: String,
    #[serde(default = "default_chapter_count")]
    pub chapter_count: u8,
}

fn default_chapter_count() -> u8 {
    3
}

#[derive(Debug, Serialize)]
pub struct GenerateNovelResponseDto {
    pub session_id: String,
    pub status: String, // "ready" | "failed"
    pub title: Option<String>,
    pub chapter_count: usize,
    pub error: Option<String>,
}

/// 生成小说（阻塞直到完成；相同请求命中进程级缓存时立即返回）
pub async fn generate_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateNovelRequest>,
) -> Result<Json<ApiResponse<GenerateNovelResponseDto>>, ApiError> {
    let cmd = GenerateNovelCommand {
        session_id: req.session_id,
        genre: req.genre,
        user_prompt: req.user_prompt,
        chapter_count: req.chapter_count,
    };

    let result = state.generate_novel_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(GenerateNovelResponseDto {
        session_id: result.session_id,
        status: result.status,
        title: result.title,
        chapter_count: result.chapter_count,
        error: result.error,
    })))
}

// ============================================================================
// Overview (title + table of contents)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetNovelRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct TocEntryDto {
    pub index: usize,
    pub heading: String,
}

#[derive(Debug, Serialize)]
pub struct NovelOverviewDto {
    pub session_id: String,
    pub status: String, // "idle" | "generating" | "ready" | "failed"
    pub title: Option<String>,
    pub chapter_count: usize,
    pub current_chapter: usize,
    pub toc: Vec<TocEntryDto>,
    pub error: Option<String>,
}

pub async fn get_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetNovelRequest>,
) -> Result<Json<ApiResponse<NovelOverviewDto>>, ApiError> {
    let result = state
        .get_novel_handler
        .handle(GetNovel {
            session_id: req.session_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(NovelOverviewDto {
        session_id: result.session_id,
        status: result.status,
        title: result.title,
        chapter_count: result.chapter_count,
        current_chapter: result.current_chapter,
        toc: result
            .toc
            .into_iter()
            .map(|entry| TocEntryDto {
                index: entry.index,
                heading: entry.heading,
            })
            .collect(),
        error: result.error,
    })))
}

// ============================================================================
// Current chapter
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterViewDto {
    pub session_id: String,
    pub chapter_index: usize,
    pub chapter_count: usize,
    pub content: String,
}

pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterViewDto>>, ApiError> {
    let result = state
        .get_chapter_handler
        .handle(GetChapter {
            session_id: req.session_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(ChapterViewDto {
        session_id: result.session_id,
        chapter_index: result.chapter_index,
        chapter_count: result.chapter_count,
        content: result.content,
    })))
}

// ============================================================================
// Download
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DownloadNovelRequest {
    pub session_id: String,
}

/// 下载完整小说：text/plain 附件，文件名按体裁命名
pub async fn download_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DownloadNovelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let download = state
        .download_novel_handler
        .handle(DownloadNovel {
            session_id: req.session_id,
        })
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", download.file_name);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| ApiError::Internal(format!("Invalid download filename: {}", e)))?,
    );

    Ok((headers, download.content))
}
