//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::ports::{SpeechAudio, SpeechRequest, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频文件路径
    pub audio_file_path: PathBuf,
    /// 固定返回的音频时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

/// Fake TTS Client
///
/// 返回配置的固定音频；从不验证内容，空数据也原样返回，
/// 供调用方的空输出处理路径做测试
pub struct FakeTtsClient {
    audio_data: Vec<u8>,
    duration_ms: Option<u64>,
    sample_rate: Option<u32>,
}

impl FakeTtsClient {
    /// 从音频文件创建
    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = std::fs::read(&config.audio_file_path)?;
        tracing::info!(
            path = %config.audio_file_path.display(),
            duration_ms = config.duration_ms,
            "FakeTtsClient initialized"
        );
        Ok(Self {
            audio_data,
            duration_ms: Some(config.duration_ms),
            sample_rate: Some(config.sample_rate),
        })
    }

    /// 直接从字节创建（测试用）
    pub fn from_bytes(audio_data: Vec<u8>) -> Self {
        Self {
            audio_data,
            duration_ms: Some(1000),
            sample_rate: Some(22050),
        }
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechAudio, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            "FakeTtsClient: returning fixed audio"
        );

        Ok(SpeechAudio {
            audio_data: self.audio_data.clone(),
            duration_ms: self.duration_ms,
            sample_rate: self.sample_rate,
        })
    }
}
