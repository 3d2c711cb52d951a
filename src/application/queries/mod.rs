//! Application Queries - CQRS 查询及处理器

pub mod handlers;
mod novel_queries;

pub use novel_queries::{
    ChapterView, DownloadNovel, GetChapter, GetNovel, NovelDownload, NovelOverview, TocEntry,
};
