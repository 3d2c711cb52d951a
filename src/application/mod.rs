//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TextGenerator、TtsEngine、NovelCache、SessionManager）
//! - gateway: 小说生成网关（提示词构造 + 记忆化缓存）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        CloseSessionHandler, GenerateNovelHandler, NarrateChapterHandler, NavigateHandler,
        OpenSessionHandler,
    },
    CloseSessionCommand, CloseSessionResponse, GenerateNovelCommand, GenerateNovelResponse,
    NarrateChapterCommand, NarrateChapterResponse, NavigateCommand, NavigateResponse,
    NavigationTarget, OpenSessionCommand, OpenSessionResponse,
};

pub use error::ApplicationError;

pub use gateway::{build_system_instruction, build_user_instruction, NovelGateway};

pub use ports::{
    // Novel cache
    generate_cache_key,
    CacheStats,
    GenerationRequest,
    NovelCachePort,
    // Session manager
    ReadingSession,
    SessionError,
    SessionManagerPort,
    SessionPhase,
    // Text generator
    CompletionRequest,
    CompletionResponse,
    GenerationError,
    TextGeneratorPort,
    // TTS engine
    SpeechAudio,
    SpeechRequest,
    TtsEnginePort,
    TtsError,
};

pub use queries::{
    handlers::{DownloadNovelHandler, GetChapterHandler, GetNovelHandler},
    ChapterView, DownloadNovel, GetChapter, GetNovel, NovelDownload, NovelOverview, TocEntry,
};
