//! Genre Handlers
//!
//! 体裁表查询（前端选择器用）

use axum::Json;
use serde::Serialize;

use crate::domain::Genre;
use crate::infrastructure::http::dto::ApiResponse;

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<GenreResponse>,
}

/// 列出所有体裁及其描述
pub async fn list_genres() -> Json<ApiResponse<GenresResponse>> {
    let genres = Genre::ALL
        .iter()
        .map(|genre| GenreResponse {
            name: genre.name(),
            description: genre.description(),
        })
        .collect();

    Json(ApiResponse::success(GenresResponse { genres }))
}
