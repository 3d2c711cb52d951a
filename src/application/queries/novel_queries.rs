//! Novel Queries - 小说相关查询

/// 获取小说概览：标题、目录、当前位置
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub session_id: String,
}

/// 目录条目（章节首行）
#[derive(Debug, Clone)]
pub struct TocEntry {
    pub index: usize,
    pub heading: String,
}

/// 小说概览
///
/// status 为会话阶段名；failed 时 error 携带失败信息，
/// title/toc 为空
#[derive(Debug, Clone)]
pub struct NovelOverview {
    pub session_id: String,
    pub status: String,
    pub title: Option<String>,
    pub chapter_count: usize,
    pub current_chapter: usize,
    pub toc: Vec<TocEntry>,
    pub error: Option<String>,
}

/// 获取当前章节内容
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub session_id: String,
}

/// 当前章节视图
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub session_id: String,
    pub chapter_index: usize,
    pub chapter_count: usize,
    pub content: String,
}

/// 下载完整小说文本
#[derive(Debug, Clone)]
pub struct DownloadNovel {
    pub session_id: String,
}

/// 下载内容：按体裁命名的纯文本文件
#[derive(Debug, Clone)]
pub struct NovelDownload {
    pub file_name: String,
    pub content: String,
}
