//! Fake LLM Client - 用于测试的文本生成客户端
//!
//! 不访问网络，按请求确定性地生成占位小说。
//! 带调用计数器，缓存相关的测试据此断言远程调用没有重复发生。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{
    CompletionRequest, CompletionResponse, GenerationError, TextGeneratorPort,
};

/// Fake LLM Client 配置
#[derive(Debug, Clone, Default)]
pub struct FakeLlmClientConfig {
    /// 设置后每次调用都以 ServiceError 失败（模拟远端故障）
    pub fail_with: Option<String>,
    /// 固定返回的文本；None 时根据请求生成占位小说
    pub canned_text: Option<String>,
}

/// Fake LLM Client
pub struct FakeLlmClient {
    config: FakeLlmClientConfig,
    call_count: AtomicUsize,
}

impl FakeLlmClient {
    pub fn new(config: FakeLlmClientConfig) -> Self {
        Self {
            config,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeLlmClientConfig::default())
    }

    /// 实际发生的 complete 调用次数
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// 从 system 提示词里恢复章节数（"... in N chapters ..."），
    /// 让占位小说的结构跟随请求
    fn requested_chapters(system: &str) -> usize {
        system
            .split_whitespace()
            .zip(system.split_whitespace().skip(1))
            .find(|(_, next)| next.starts_with("chapter"))
            .and_then(|(count, _)| count.parse().ok())
            .unwrap_or(3)
    }

    fn placeholder_novel(request: &CompletionRequest) -> String {
        let chapters = Self::requested_chapters(&request.system);
        let mut novel = String::from("# A Placeholder Novel\n\n");
        for i in 1..=chapters {
            novel.push_str(&format!(
                "## Chapter {}: Placeholder\n\nGenerated prose for chapter {}.\n\n",
                i, i
            ));
        }
        novel
    }
}

#[async_trait]
impl TextGeneratorPort for FakeLlmClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.config.fail_with {
            return Err(GenerationError::ServiceError(message.clone()));
        }

        let content = self
            .config
            .canned_text
            .clone()
            .unwrap_or_else(|| Self::placeholder_novel(&request));

        tracing::debug!(
            content_len = content.len(),
            "FakeLlmClient: returning placeholder novel"
        );

        Ok(CompletionResponse {
            content,
            model: Some("fake".to_string()),
            total_tokens: None,
        })
    }
}
