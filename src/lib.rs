//! Narra - AI 小说生成与朗读系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chapter: 章节切分、标题提取、朗读文本清理
//! - Genre: 小说类型目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGenerator, TtsEngine, NovelCache, SessionManager）
//! - Gateway: 生成网关（缓存 + 文本生成引擎编排）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: SessionManager, NovelCache 内存实现
//! - Adapters: LLM Client, TTS Client
//! - GC: 过期会话回收

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
