//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/genres           GET   体裁表（名称 + 描述）
//! - /api/session/open     POST  创建阅读会话
//! - /api/session/close    POST  关闭会话
//! - /api/session/prev     POST  上一章（索引 0 处 no-op）
//! - /api/session/next     POST  下一章（末章处 no-op）
//! - /api/session/goto     POST  目录跳转（越界夹取）
//! - /api/novel/generate   POST  生成小说（阻塞，命中缓存时立即返回）
//! - /api/novel/get        POST  小说概览（标题/目录/当前位置）
//! - /api/novel/chapter    POST  当前章节内容
//! - /api/novel/download   POST  下载完整文本
//! - /api/narrate          POST  朗读当前章节（audio/wav）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/genres", get(handlers::list_genres))
        .nest("/session", session_routes())
        .nest("/novel", novel_routes())
        .route("/narrate", post(handlers::narrate_chapter))
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_session))
        .route("/close", post(handlers::close_session))
        .route("/prev", post(handlers::previous_chapter))
        .route("/next", post(handlers::next_chapter))
        .route("/goto", post(handlers::goto_chapter))
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_novel))
        .route("/get", post(handlers::get_novel))
        .route("/chapter", post(handlers::get_chapter))
        .route("/download", post(handlers::download_novel))
}
