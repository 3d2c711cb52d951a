//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CloseSessionHandler, GenerateNovelHandler, NarrateChapterHandler, NavigateHandler,
    OpenSessionHandler,
    // Query handlers
    DownloadNovelHandler, GetChapterHandler, GetNovelHandler,
    // Gateway + ports
    NovelCachePort, NovelGateway, SessionManagerPort, TtsEnginePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session_manager: Arc<dyn SessionManagerPort>,
    pub novel_cache: Arc<dyn NovelCachePort>,
    pub tts_engine: Arc<dyn TtsEnginePort>,
    pub gateway: Arc<NovelGateway>,

    // ========== Command Handlers ==========
    pub open_session_handler: OpenSessionHandler,
    pub close_session_handler: CloseSessionHandler,
    pub generate_novel_handler: GenerateNovelHandler,
    pub navigate_handler: NavigateHandler,
    pub narrate_chapter_handler: NarrateChapterHandler,

    // ========== Query Handlers ==========
    pub get_novel_handler: GetNovelHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub download_novel_handler: DownloadNovelHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session_manager: Arc<dyn SessionManagerPort>,
        novel_cache: Arc<dyn NovelCachePort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        gateway: Arc<NovelGateway>,
        min_chapters: u8,
        max_chapters: u8,
    ) -> Self {
        Self {
            // Ports
            session_manager: session_manager.clone(),
            novel_cache,
            tts_engine: tts_engine.clone(),
            gateway: gateway.clone(),

            // Command handlers
            open_session_handler: OpenSessionHandler::new(session_manager.clone()),
            close_session_handler: CloseSessionHandler::new(session_manager.clone()),
            generate_novel_handler: GenerateNovelHandler::new(
                session_manager.clone(),
                gateway,
                min_chapters,
                max_chapters,
            ),
            navigate_handler: NavigateHandler::new(session_manager.clone()),
            narrate_chapter_handler: NarrateChapterHandler::new(
                session_manager.clone(),
                tts_engine,
            ),

            // Query handlers
            get_novel_handler: GetNovelHandler::new(session_manager.clone()),
            get_chapter_handler: GetChapterHandler::new(session_manager.clone()),
            download_novel_handler: DownloadNovelHandler::new(session_manager),
        }
    }
}
