//! Session Manager Port - 阅读会话生命周期管理
//!
//! 定义阅读会话的抽象接口，具体实现在 infrastructure/memory 层。
//! 会话是一个显式的状态机：Idle → Generating → Ready/Failed，
//! 同一会话同时最多只有一次进行中的生成。

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::novel_cache::GenerationRequest;

/// Session Manager 错误
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),

    #[error("Generation already in progress for session: {0}")]
    GenerationInFlight(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// 会话阶段
///
/// - Idle: 尚无小说，也没有生成进行中
/// - Generating: 一次生成进行中（同一会话互斥）
/// - Ready: 小说已生成并完成章节分割，可翻页阅读
/// - Failed: 生成失败，只保存失败信息，从未执行分割
#[derive(Debug, Clone)]
pub enum SessionPhase {
    Idle,
    Generating {
        request: GenerationRequest,
    },
    Ready {
        request: GenerationRequest,
        novel: String,
        title: String,
        chapters: Vec<String>,
    },
    Failed {
        message: String,
    },
}

impl SessionPhase {
    /// 阶段名称（用于 API 响应和日志）
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Generating { .. } => "generating",
            SessionPhase::Ready { .. } => "ready",
            SessionPhase::Failed { .. } => "failed",
        }
    }
}

/// 阅读会话状态（in-memory）
#[derive(Debug, Clone)]
pub struct ReadingSession {
    pub id: String,
    pub phase: SessionPhase,
    /// 当前展示的章节索引，始终落在分割结果的有效范围内
    pub current_chapter: usize,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ReadingSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            phase: SessionPhase::Idle,
            current_chapter: 0,
            created_at: now,
            last_activity: now,
        }
    }

    /// 已分割的章节数（非 Ready 阶段为 0）
    pub fn chapter_count(&self) -> usize {
        match &self.phase {
            SessionPhase::Ready { chapters, .. } => chapters.len(),
            _ => 0,
        }
    }
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Session Manager Port
///
/// 管理阅读会话的生命周期，所有状态存储在内存中
pub trait SessionManagerPort: Send + Sync {
    /// 创建新会话
    fn create(&self, session: ReadingSession) -> Result<String, SessionError>;

    /// 获取会话快照
    fn get(&self, id: &str) -> Result<ReadingSession, SessionError>;

    /// 进入 Generating 阶段
    ///
    /// 清除上一部小说，章节索引归零。已有生成进行中时返回
    /// `GenerationInFlight`，保证同一会话的生成互斥
    fn begin_generation(&self, id: &str, request: GenerationRequest) -> Result<(), SessionError>;

    /// 结束 Generating 阶段，写入 Ready 或 Failed 结果
    fn complete_generation(&self, id: &str, outcome: SessionPhase) -> Result<(), SessionError>;

    /// 更新当前章节索引，夹取到 `[0, chapter_count - 1]`
    ///
    /// 返回生效后的索引。非 Ready 阶段返回 `InvalidState`
    fn update_chapter(&self, id: &str, index: usize) -> Result<usize, SessionError>;

    /// 更新最后活动时间
    fn touch(&self, id: &str);

    /// 关闭会话
    fn close(&self, id: &str) -> Result<(), SessionError>;

    /// 获取所有过期会话的 ID
    fn get_expired_sessions(&self, idle_timeout_secs: u64) -> Vec<String>;

    /// 获取所有会话 ID
    fn list_all(&self) -> Vec<String>;
}
