//! Novel Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, SessionPhase};
use crate::application::queries::novel_queries::*;

/// GetNovel Handler - 概览查询
pub struct GetNovelHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetNovelHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, query: GetNovel) -> Result<NovelOverview, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;
        let status = session.phase.name().to_string();

        let overview = match &session.phase {
            SessionPhase::Ready {
                title, chapters, ..
            } => NovelOverview {
                session_id: query.session_id,
                status,
                title: Some(title.clone()),
                chapter_count: chapters.len(),
                current_chapter: session.current_chapter,
                toc: build_toc(chapters),
                error: None,
            },
            SessionPhase::Failed { message } => NovelOverview {
                session_id: query.session_id,
                status,
                title: None,
                chapter_count: 0,
                current_chapter: 0,
                toc: Vec::new(),
                error: Some(message.clone()),
            },
            _ => NovelOverview {
                session_id: query.session_id,
                status,
                title: None,
                chapter_count: 0,
                current_chapter: 0,
                toc: Vec::new(),
                error: None,
            },
        };

        Ok(overview)
    }
}

/// 目录由每章的首行构成，空首行时兜底为 "Chapter N"
fn build_toc(chapters: &[String]) -> Vec<TocEntry> {
    chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            let first_line = chapter.lines().next().unwrap_or("").trim();
            let heading = if first_line.is_empty() {
                format!("Chapter {}", index + 1)
            } else {
                first_line.to_string()
            };
            TocEntry { index, heading }
        })
        .collect()
}

/// GetChapter Handler - 当前章节内容
pub struct GetChapterHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl GetChapterHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterView, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;

        let chapters = match &session.phase {
            SessionPhase::Ready { chapters, .. } => chapters,
            other => {
                return Err(ApplicationError::invalid_state(format!(
                    "No novel to display (session phase: {})",
                    other.name()
                )))
            }
        };

        let content = chapters
            .get(session.current_chapter)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::internal(format!(
                    "Chapter index out of range: {}",
                    session.current_chapter
                ))
            })?;

        self.session_manager.touch(&query.session_id);

        Ok(ChapterView {
            session_id: query.session_id,
            chapter_index: session.current_chapter,
            chapter_count: chapters.len(),
            content,
        })
    }
}

/// DownloadNovel Handler - 完整文本下载
pub struct DownloadNovelHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl DownloadNovelHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, query: DownloadNovel) -> Result<NovelDownload, ApplicationError> {
        let session = self.session_manager.get(&query.session_id)?;

        match &session.phase {
            SessionPhase::Ready { request, novel, .. } => Ok(NovelDownload {
                file_name: format!("{}_novel.txt", request.genre.slug()),
                content: novel.clone(),
            }),
            other => Err(ApplicationError::invalid_state(format!(
                "No novel to download (session phase: {})",
                other.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GenerationRequest, ReadingSession};
    use crate::domain::{split_into_chapters, Genre};
    use crate::infrastructure::memory::InMemorySessionManager;

    const NOVEL: &str =
        "# The Silent Vault\n\n## Chapter 1: Keys\nProse one.\n## Chapter 2: Locks\nProse two.";

    fn ready_session(manager: &InMemorySessionManager) -> String {
        let id = manager.create(ReadingSession::new()).unwrap();
        let request = GenerationRequest::new(Genre::Mystery, "", 2);
        manager.begin_generation(&id, request.clone()).unwrap();
        manager
            .complete_generation(
                &id,
                SessionPhase::Ready {
                    request,
                    novel: NOVEL.to_string(),
                    title: "The Silent Vault".to_string(),
                    chapters: split_into_chapters(NOVEL),
                },
            )
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_overview_lists_toc() {
        let manager = Arc::new(InMemorySessionManager::new());
        let id = ready_session(&manager);
        let handler = GetNovelHandler::new(manager);

        let overview = handler.handle(GetNovel { session_id: id }).await.unwrap();

        assert_eq!(overview.status, "ready");
        assert_eq!(overview.title.as_deref(), Some("The Silent Vault"));
        assert_eq!(overview.chapter_count, 2);
        // 序言并入第一章，目录首条是第一章的首行（书名行）
        assert_eq!(overview.toc[0].heading, "# The Silent Vault");
        assert_eq!(overview.toc[1].heading, "## Chapter 2: Locks");
    }

    #[tokio::test]
    async fn test_overview_of_failed_session_carries_error() {
        let manager = Arc::new(InMemorySessionManager::new());
        let id = manager.create(ReadingSession::new()).unwrap();
        manager
            .begin_generation(&id, GenerationRequest::new(Genre::Horror, "", 2))
            .unwrap();
        manager
            .complete_generation(
                &id,
                SessionPhase::Failed {
                    message: "quota exceeded".to_string(),
                },
            )
            .unwrap();

        let overview = GetNovelHandler::new(manager)
            .handle(GetNovel { session_id: id })
            .await
            .unwrap();

        assert_eq!(overview.status, "failed");
        assert_eq!(overview.error.as_deref(), Some("quota exceeded"));
        assert!(overview.toc.is_empty());
    }

    #[tokio::test]
    async fn test_chapter_view_returns_current_chapter() {
        let manager = Arc::new(InMemorySessionManager::new());
        let id = ready_session(&manager);
        manager.update_chapter(&id, 1).unwrap();

        let view = GetChapterHandler::new(manager)
            .handle(GetChapter { session_id: id })
            .await
            .unwrap();

        assert_eq!(view.chapter_index, 1);
        assert_eq!(view.content, "## Chapter 2: Locks\nProse two.");
    }

    #[tokio::test]
    async fn test_download_uses_genre_slug() {
        let manager = Arc::new(InMemorySessionManager::new());
        let id = ready_session(&manager);

        let download = DownloadNovelHandler::new(manager)
            .handle(DownloadNovel { session_id: id })
            .await
            .unwrap();

        assert_eq!(download.file_name, "mystery_novel.txt");
        assert_eq!(download.content, NOVEL);
    }

    #[tokio::test]
    async fn test_download_without_novel_is_invalid() {
        let manager = Arc::new(InMemorySessionManager::new());
        let id = manager.create(ReadingSession::new()).unwrap();

        let result = DownloadNovelHandler::new(manager)
            .handle(DownloadNovel { session_id: id })
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }
}
