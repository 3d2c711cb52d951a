//! HTTP LLM Client - 调用外部文本生成服务
//!
//! 实现 TextGeneratorPort trait，通过 OpenAI 兼容的
//! chat completions 接口调用远程大模型
//!
//! 外部 API:
//! POST {base_url}/v1/chat/completions
//! Request: {"model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}]}
//! Response: {"choices": [{"message": {"content": "..."}}], ...}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    CompletionRequest, CompletionResponse, GenerationError, TextGeneratorPort,
};

/// Chat completions 请求体 (JSON)
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completions 响应体 (JSON)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: Option<u64>,
}

/// HTTP LLM 客户端配置
#[derive(Debug, Clone)]
pub struct HttpLlmClientConfig {
    /// 生成服务基础 URL
    pub base_url: String,
    /// 模型标识
    pub model: String,
    /// Bearer 凭证（从环境变量加载，见 config.llm.api_key_env）
    pub api_key: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 网络失败时的最大重试次数
    pub max_retries: u32,
}

impl Default for HttpLlmClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout_secs: 120,
            max_retries: 0,
        }
    }
}

impl HttpLlmClientConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP LLM 客户端
pub struct HttpLlmClient {
    client: Client,
    config: HttpLlmClientConfig,
}

impl HttpLlmClient {
    /// 创建新的 HTTP LLM 客户端
    pub fn new(config: HttpLlmClientConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取生成 URL
    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// 获取模型列表 URL（健康检查用）
    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url)
    }

    async fn send_once(&self, body: &ChatRequest) -> Result<reqwest::Response, GenerationError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            GenerationError::MissingCredentials(
                "No API key configured for the generation service".to_string(),
            )
        })?;

        self.client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else if e.is_connect() {
                    GenerationError::NetworkError(format!(
                        "Cannot connect to generation service: {}",
                        e
                    ))
                } else {
                    GenerationError::NetworkError(e.to_string())
                }
            })
    }
}

#[async_trait]
impl TextGeneratorPort for HttpLlmClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            system_len = body.messages[0].content.len(),
            user_len = body.messages[1].content.len(),
            "Sending completion request"
        );

        // 网络层失败时按配置重试；服务端 4xx/5xx 不重试
        let mut attempt = 0;
        let response = loop {
            match self.send_once(&body).await {
                Ok(response) => break response,
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "Completion request failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        };

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::InvalidResponse("Response contained no choices".to_string())
            })?;

        let total_tokens = chat.usage.and_then(|u| u.total_tokens);

        tracing::info!(
            model = ?chat.model,
            total_tokens = ?total_tokens,
            content_len = content.len(),
            "Completion received"
        );

        Ok(CompletionResponse {
            content,
            model: chat.model,
            total_tokens,
        })
    }

    async fn health_check(&self) -> bool {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return false;
        };
        match self
            .client
            .get(self.models_url())
            .bearer_auth(api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpLlmClientConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = HttpLlmClientConfig::new("http://llm.internal:8080", "phi-4")
            .with_api_key(Some("secret".to_string()))
            .with_timeout(60);
        assert_eq!(config.base_url, "http://llm.internal:8080");
        assert_eq!(config.model, "phi-4");
        assert_eq!(config.timeout_secs, 60);
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected_before_network() {
        let client = HttpLlmClient::new(HttpLlmClientConfig::default()).unwrap();
        let result = client
            .complete(CompletionRequest {
                system: "s".to_string(),
                user: "u".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(GenerationError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_response_parsing() {
        let json = r###"{
            "model": "phi-4",
            "choices": [{"message": {"role": "assistant", "content": "## Chapter 1: A\ntext"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 90, "total_tokens": 100}
        }"###;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "## Chapter 1: A\ntext");
        assert_eq!(parsed.usage.unwrap().total_tokens, Some(100));
    }
}
