//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义章节朗读的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Engine produced no audio")]
    EmptyAudio,
}

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 要合成的纯文本（标题行已由调用方剔除）
    pub text: String,
}

/// 语音合成响应
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// 合成的音频数据（WAV）
    pub audio_data: Vec<u8>,
    /// 音频时长（毫秒）
    pub duration_ms: Option<u64>,
    /// 采样率
    pub sample_rate: Option<u32>,
}

/// TTS Engine Port
///
/// 外部语音合成服务的抽象接口。合成失败是非致命的：
/// 调用方把错误转为用户可见的警告，阅读会话不受影响
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成一段文本
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, TtsError>;

    /// 检查 TTS 服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
