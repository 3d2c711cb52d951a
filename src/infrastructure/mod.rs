//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod gc;
pub mod http;
pub mod memory;

pub use gc::{SessionGc, SessionGcConfig};
pub use memory::{InMemoryNovelCache, InMemorySessionManager};
