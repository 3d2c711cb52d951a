//! Session Command Handlers - 阅读会话状态机
//!
//! Idle/Generating → Ready/Failed 的转换和章节翻页都在这里编排

use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::gateway::NovelGateway;
use crate::application::ports::{
    GenerationRequest, ReadingSession, SessionManagerPort, SessionPhase,
};
use crate::domain::{extract_title, split_into_chapters};

/// OpenSession Handler - 创建空闲会话
pub struct OpenSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl OpenSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        _cmd: OpenSessionCommand,
    ) -> Result<OpenSessionResponse, ApplicationError> {
        let session = ReadingSession::new();
        let session_id = self.session_manager.create(session)?;

        tracing::info!(session_id = %session_id, "Reading session opened");

        Ok(OpenSessionResponse { session_id })
    }
}

/// CloseSession Handler
pub struct CloseSessionHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl CloseSessionHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(
        &self,
        cmd: CloseSessionCommand,
    ) -> Result<CloseSessionResponse, ApplicationError> {
        self.session_manager.close(&cmd.session_id)?;

        tracing::info!(session_id = %cmd.session_id, "Reading session closed");

        Ok(CloseSessionResponse {
            session_id: cmd.session_id,
        })
    }
}

/// GenerateNovel Handler - 阻塞式生成
///
/// 进入 Generating 阶段后等待 Gateway 返回；成功时做一次章节分割并
/// 写入 Ready，失败时写入 Failed 且从不执行分割。同一会话的并发
/// 生成请求被 Generating 互斥拒绝
pub struct GenerateNovelHandler {
    session_manager: Arc<dyn SessionManagerPort>,
    gateway: Arc<NovelGateway>,
    min_chapters: u8,
    max_chapters: u8,
}

impl GenerateNovelHandler {
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        gateway: Arc<NovelGateway>,
        min_chapters: u8,
        max_chapters: u8,
    ) -> Self {
        Self {
            session_manager,
            gateway,
            min_chapters,
            max_chapters,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateNovelCommand,
    ) -> Result<GenerateNovelResponse, ApplicationError> {
        if cmd.chapter_count < self.min_chapters || cmd.chapter_count > self.max_chapters {
            return Err(ApplicationError::validation(format!(
                "Invalid chapter count: {} (allowed range: {}..={})",
                cmd.chapter_count, self.min_chapters, self.max_chapters
            )));
        }

        let request = GenerationRequest::new(cmd.genre, cmd.user_prompt, cmd.chapter_count);

        // 进入 Generating：清除上一部小说，索引归零
        self.session_manager
            .begin_generation(&cmd.session_id, request.clone())?;

        let outcome = match self.gateway.generate(&request).await {
            Ok(novel) => {
                let chapters = split_into_chapters(&novel);
                if chapters.is_empty() {
                    SessionPhase::Failed {
                        message: "Generation service returned empty text".to_string(),
                    }
                } else {
                    let title = extract_title(&novel).to_string();
                    SessionPhase::Ready {
                        request,
                        novel,
                        title,
                        chapters,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %cmd.session_id,
                    genre = %cmd.genre,
                    error = %e,
                    "Novel generation failed"
                );
                SessionPhase::Failed {
                    message: format!("Error generating novel: {}", e),
                }
            }
        };

        self.session_manager
            .complete_generation(&cmd.session_id, outcome)?;

        let session = self.session_manager.get(&cmd.session_id)?;
        match session.phase {
            SessionPhase::Ready {
                title, chapters, ..
            } => {
                tracing::info!(
                    session_id = %cmd.session_id,
                    title = %title,
                    chapter_count = chapters.len(),
                    "Novel ready"
                );
                Ok(GenerateNovelResponse {
                    session_id: cmd.session_id,
                    status: "ready".to_string(),
                    title: Some(title),
                    chapter_count: chapters.len(),
                    error: None,
                })
            }
            SessionPhase::Failed { message } => Ok(GenerateNovelResponse {
                session_id: cmd.session_id,
                status: "failed".to_string(),
                title: None,
                chapter_count: 0,
                error: Some(message),
            }),
            other => Err(ApplicationError::internal(format!(
                "Unexpected session phase after generation: {}",
                other.name()
            ))),
        }
    }
}

/// Navigate Handler - 章节翻页
///
/// 索引夹取到 `[0, chapter_count - 1]`：
/// 首章的 Previous 和末章的 Next 都是 no-op
pub struct NavigateHandler {
    session_manager: Arc<dyn SessionManagerPort>,
}

impl NavigateHandler {
    pub fn new(session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self { session_manager }
    }

    pub async fn handle(&self, cmd: NavigateCommand) -> Result<NavigateResponse, ApplicationError> {
        let session = self.session_manager.get(&cmd.session_id)?;
        let chapter_count = session.chapter_count();

        let desired = match cmd.target {
            NavigationTarget::Previous => session.current_chapter.saturating_sub(1),
            NavigationTarget::Next => session.current_chapter.saturating_add(1),
            NavigationTarget::Chapter(index) => index,
        };

        let current_chapter = self
            .session_manager
            .update_chapter(&cmd.session_id, desired)?;

        tracing::debug!(
            session_id = %cmd.session_id,
            current_chapter = current_chapter,
            "Session navigated"
        );

        Ok(NavigateResponse {
            session_id: cmd.session_id,
            current_chapter,
            chapter_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Genre;
    use crate::infrastructure::adapters::{FakeLlmClient, FakeLlmClientConfig};
    use crate::infrastructure::memory::{InMemoryNovelCache, InMemorySessionManager};

    fn setup(
        fake_config: FakeLlmClientConfig,
    ) -> (
        Arc<InMemorySessionManager>,
        GenerateNovelHandler,
        NavigateHandler,
    ) {
        let session_manager = Arc::new(InMemorySessionManager::new());
        let generator = Arc::new(FakeLlmClient::new(fake_config));
        let cache = Arc::new(InMemoryNovelCache::new());
        let gateway = Arc::new(NovelGateway::new(generator, cache));
        (
            session_manager.clone(),
            GenerateNovelHandler::new(session_manager.clone(), gateway, 2, 5),
            NavigateHandler::new(session_manager),
        )
    }

    async fn open_session(manager: &Arc<InMemorySessionManager>) -> String {
        OpenSessionHandler::new(manager.clone())
            .handle(OpenSessionCommand)
            .await
            .unwrap()
            .session_id
    }

    fn generate_cmd(session_id: &str, chapter_count: u8) -> GenerateNovelCommand {
        GenerateNovelCommand {
            session_id: session_id.to_string(),
            genre: Genre::Fantasy,
            user_prompt: String::new(),
            chapter_count,
        }
    }

    #[tokio::test]
    async fn test_successful_generation_reaches_ready() {
        let (manager, generate, _) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;

        let response = generate.handle(generate_cmd(&session_id, 3)).await.unwrap();

        assert_eq!(response.status, "ready");
        assert_eq!(response.chapter_count, 3);
        assert!(response.error.is_none());

        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.current_chapter, 0);
        assert!(matches!(session.phase, SessionPhase::Ready { .. }));
    }

    #[tokio::test]
    async fn test_failed_generation_skips_segmentation() {
        let (manager, generate, _) = setup(FakeLlmClientConfig {
            fail_with: Some("service unavailable".to_string()),
            ..Default::default()
        });
        let session_id = open_session(&manager).await;

        let response = generate.handle(generate_cmd(&session_id, 3)).await.unwrap();

        assert_eq!(response.status, "failed");
        assert!(response.error.unwrap().contains("service unavailable"));

        // Failed 阶段没有任何章节，分割从未执行
        let session = manager.get(&session_id).unwrap();
        assert!(matches!(session.phase, SessionPhase::Failed { .. }));
        assert_eq!(session.chapter_count(), 0);
    }

    #[tokio::test]
    async fn test_chapter_count_bounds_enforced() {
        let (manager, generate, _) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;

        let too_few = generate.handle(generate_cmd(&session_id, 1)).await;
        let too_many = generate.handle(generate_cmd(&session_id, 6)).await;

        assert!(matches!(
            too_few,
            Err(ApplicationError::ValidationError(_))
        ));
        assert!(matches!(
            too_many,
            Err(ApplicationError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_navigation_clamps_at_both_ends() {
        let (manager, generate, navigate) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;
        let chapter_count = generate
            .handle(generate_cmd(&session_id, 3))
            .await
            .unwrap()
            .chapter_count;

        // 索引 0 处 Previous 是 no-op
        let response = navigate
            .handle(NavigateCommand {
                session_id: session_id.clone(),
                target: NavigationTarget::Previous,
            })
            .await
            .unwrap();
        assert_eq!(response.current_chapter, 0);

        // 翻到末章后 Next 是 no-op
        for _ in 0..chapter_count + 2 {
            navigate
                .handle(NavigateCommand {
                    session_id: session_id.clone(),
                    target: NavigationTarget::Next,
                })
                .await
                .unwrap();
        }
        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.current_chapter, chapter_count - 1);
    }

    #[tokio::test]
    async fn test_goto_out_of_range_is_clamped() {
        let (manager, generate, navigate) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;
        generate.handle(generate_cmd(&session_id, 3)).await.unwrap();

        let response = navigate
            .handle(NavigateCommand {
                session_id: session_id.clone(),
                target: NavigationTarget::Chapter(99),
            })
            .await
            .unwrap();

        assert_eq!(response.current_chapter, response.chapter_count - 1);
    }

    #[tokio::test]
    async fn test_navigation_without_novel_is_invalid() {
        let (manager, _, navigate) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;

        let result = navigate
            .handle(NavigateCommand {
                session_id,
                target: NavigationTarget::Next,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_regeneration_resets_chapter_index() {
        let (manager, generate, navigate) = setup(FakeLlmClientConfig::default());
        let session_id = open_session(&manager).await;
        generate.handle(generate_cmd(&session_id, 3)).await.unwrap();

        navigate
            .handle(NavigateCommand {
                session_id: session_id.clone(),
                target: NavigationTarget::Next,
            })
            .await
            .unwrap();

        generate.handle(generate_cmd(&session_id, 4)).await.unwrap();

        let session = manager.get(&session_id).unwrap();
        assert_eq!(session.current_chapter, 0);
        assert_eq!(session.chapter_count(), 4);
    }
}
