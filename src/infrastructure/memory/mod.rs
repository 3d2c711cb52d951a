//! In-Memory Implementations
//!
//! SessionManager 与 NovelCache 的内存实现

mod novel_cache;
mod session_manager;

pub use novel_cache::InMemoryNovelCache;
pub use session_manager::InMemorySessionManager;
