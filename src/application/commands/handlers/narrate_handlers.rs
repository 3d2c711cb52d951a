//! Narrate Command Handler - 章节朗读
//!
//! 只朗读当前展示的章节。合成失败是非致命的：调用方收到
//! ExternalServiceError 并转为警告，会话状态不受影响

use std::sync::Arc;

use crate::application::commands::narrate_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{SessionManagerPort, SessionPhase, SpeechRequest, TtsEnginePort};
use crate::domain::narration_text;

/// NarrateChapter Handler
pub struct NarrateChapterHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
}

impl NarrateChapterHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
    ) -> Self {
        Self {
            session_manager,
            tts_engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: NarrateChapterCommand,
    ) -> Result<NarrateChapterResponse, ApplicationError> {
        let session = self.session_manager.get(&cmd.session_id)?;

        let (chapters, chapter_index) = match &session.phase {
            SessionPhase::Ready { chapters, .. } => (chapters, session.current_chapter),
            other => {
                return Err(ApplicationError::invalid_state(format!(
                    "No novel to narrate (session phase: {})",
                    other.name()
                )))
            }
        };

        let chapter = chapters.get(chapter_index).ok_or_else(|| {
            ApplicationError::internal(format!("Chapter index out of range: {}", chapter_index))
        })?;

        // 标题行不进入朗读文本
        let text = narration_text(chapter);
        if text.trim().is_empty() {
            return Err(ApplicationError::validation(
                "Current chapter has no narratable text",
            ));
        }

        let audio = self
            .tts_engine
            .synthesize(SpeechRequest { text })
            .await
            .map_err(|e| {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    chapter_index = chapter_index,
                    error = %e,
                    "Chapter narration failed"
                );
                ApplicationError::external(format!("Text-to-speech unavailable: {}", e))
            })?;

        if audio.audio_data.is_empty() {
            return Err(ApplicationError::external("Could not generate audio"));
        }

        self.session_manager.touch(&cmd.session_id);

        tracing::info!(
            session_id = %cmd.session_id,
            chapter_index = chapter_index,
            audio_size = audio.audio_data.len(),
            duration_ms = ?audio.duration_ms,
            "Chapter narration completed"
        );

        Ok(NarrateChapterResponse {
            session_id: cmd.session_id,
            chapter_index,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{GenerationRequest, ReadingSession};
    use crate::domain::Genre;
    use crate::infrastructure::adapters::FakeTtsClient;
    use crate::infrastructure::memory::InMemorySessionManager;

    fn ready_session(manager: &InMemorySessionManager, novel: &str) -> String {
        let session = ReadingSession::new();
        let id = manager.create(session).unwrap();
        let request = GenerationRequest::new(Genre::Fantasy, "", 2);
        manager.begin_generation(&id, request.clone()).unwrap();
        manager
            .complete_generation(
                &id,
                SessionPhase::Ready {
                    request,
                    novel: novel.to_string(),
                    title: "t".to_string(),
                    chapters: crate::domain::split_into_chapters(novel),
                },
            )
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_narrates_current_chapter() {
        let manager = Arc::new(InMemorySessionManager::new());
        let tts = Arc::new(FakeTtsClient::from_bytes(vec![82, 73, 70, 70]));
        let handler = NarrateChapterHandler::new(manager.clone(), tts);

        let id = ready_session(&manager, "## Chapter 1: A\nSome prose.\n## Chapter 2: B\nMore.");
        let response = handler
            .handle(NarrateChapterCommand { session_id: id })
            .await
            .unwrap();

        assert_eq!(response.chapter_index, 0);
        assert!(!response.audio.audio_data.is_empty());
    }

    #[tokio::test]
    async fn test_heading_only_chapter_is_rejected() {
        let manager = Arc::new(InMemorySessionManager::new());
        let tts = Arc::new(FakeTtsClient::from_bytes(vec![1]));
        let handler = NarrateChapterHandler::new(manager.clone(), tts);

        let id = ready_session(&manager, "## Chapter 1: Silent");
        let result = handler
            .handle(NarrateChapterCommand { session_id: id })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_idle_session_cannot_narrate() {
        let manager = Arc::new(InMemorySessionManager::new());
        let tts = Arc::new(FakeTtsClient::from_bytes(vec![1]));
        let handler = NarrateChapterHandler::new(manager.clone(), tts);

        let id = manager.create(ReadingSession::new()).unwrap();
        let result = handler
            .handle(NarrateChapterCommand { session_id: id })
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_empty_audio_surfaces_as_external_error() {
        let manager = Arc::new(InMemorySessionManager::new());
        let tts = Arc::new(FakeTtsClient::from_bytes(Vec::new()));
        let handler = NarrateChapterHandler::new(manager.clone(), tts);

        let id = ready_session(&manager, "## Chapter 1: A\nprose");
        let result = handler
            .handle(NarrateChapterCommand { session_id: id })
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::ExternalServiceError(_))
        ));
    }
}
