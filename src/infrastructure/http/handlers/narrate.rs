//! Narrate Handler - 当前章节朗读
//!
//! 返回 audio/wav 字节流，元数据放在 X-Narration-* headers。
//! 合成失败映射为非致命的业务错误（errno 503），会话仍可继续阅读

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::NarrateChapterCommand;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    pub session_id: String,
}

pub async fn narrate_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NarrateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .narrate_chapter_handler
        .handle(NarrateChapterCommand {
            session_id: req.session_id,
        })
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    headers.insert(
        "X-Narration-Chapter-Index",
        HeaderValue::from_str(&result.chapter_index.to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("0")),
    );
    if let Some(duration_ms) = result.audio.duration_ms {
        if let Ok(value) = HeaderValue::from_str(&duration_ms.to_string()) {
            headers.insert("X-Narration-Duration-Ms", value);
        }
    }
    if let Some(sample_rate) = result.audio.sample_rate {
        if let Ok(value) = HeaderValue::from_str(&sample_rate.to_string()) {
            headers.insert("X-Narration-Sample-Rate", value);
        }
    }

    Ok((headers, result.audio.audio_data))
}
