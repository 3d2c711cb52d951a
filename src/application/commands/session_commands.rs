//! Session Commands - 会话相关命令

use crate::domain::Genre;

/// 打开会话命令 - 创建一个空闲的阅读会话
#[derive(Debug, Clone)]
pub struct OpenSessionCommand;

/// 打开会话响应
#[derive(Debug, Clone)]
pub struct OpenSessionResponse {
    pub session_id: String,
}

/// 关闭会话命令
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: String,
}

/// 关闭会话响应
#[derive(Debug, Clone)]
pub struct CloseSessionResponse {
    pub session_id: String,
}

/// 生成小说命令 - 阻塞直到生成完成或失败
#[derive(Debug, Clone)]
pub struct GenerateNovelCommand {
    pub session_id: String,
    pub genre: Genre,
    pub user_prompt: String,
    pub chapter_count: u8,
}

/// 生成小说响应
///
/// status 为 "ready" 或 "failed"；失败时 error 携带诊断信息，
/// title/chapter_count 无意义
#[derive(Debug, Clone)]
pub struct GenerateNovelResponse {
    pub session_id: String,
    pub status: String,
    pub title: Option<String>,
    pub chapter_count: usize,
    pub error: Option<String>,
}

/// 翻页目标
#[derive(Debug, Clone, Copy)]
pub enum NavigationTarget {
    /// 上一章（索引 0 处为 no-op）
    Previous,
    /// 下一章（末章处为 no-op）
    Next,
    /// 目录跳转到指定章节（越界时夹取）
    Chapter(usize),
}

/// 翻页命令
#[derive(Debug, Clone)]
pub struct NavigateCommand {
    pub session_id: String,
    pub target: NavigationTarget,
}

/// 翻页响应
#[derive(Debug, Clone)]
pub struct NavigateResponse {
    pub session_id: String,
    pub current_chapter: usize,
    pub chapter_count: usize,
}
