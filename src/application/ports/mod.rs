//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod novel_cache;
mod session_manager;
mod text_generator;
mod tts_engine;

pub use novel_cache::{
    generate_cache_key, CacheStats, GenerationRequest, NovelCachePort,
};
pub use session_manager::{
    ReadingSession, SessionError, SessionManagerPort, SessionPhase,
};
pub use text_generator::{
    CompletionRequest, CompletionResponse, GenerationError, TextGeneratorPort,
};
pub use tts_engine::{SpeechAudio, SpeechRequest, TtsEnginePort, TtsError};
