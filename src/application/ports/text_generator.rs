//! Text Generator Port - 文本生成引擎抽象
//!
//! 定义远程大模型文本生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),
}

/// 文本生成请求
///
/// system 部分约束输出结构（章节标题格式、叙事弧线），
/// user 部分携带体裁、描述与可选的用户开头
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// 文本生成响应
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// 生成的 markdown 文本（逐字返回，不做后处理）
    pub content: String,
    /// 实际使用的模型标识（用于日志）
    pub model: Option<String>,
    /// 消耗的 token 总数（用于日志）
    pub total_tokens: Option<u64>,
}

/// Text Generator Port
///
/// 外部文本生成服务的抽象接口
#[async_trait]
pub trait TextGeneratorPort: Send + Sync {
    /// 执行一次文本生成
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError>;

    /// 检查生成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
