//! In-Memory Novel Cache Implementation
//!
//! DashMap 支撑的进程级缓存：无淘汰、无失效，进程退出即消失。
//! 并发会话下无需额外加锁。

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{CacheStats, NovelCachePort};

/// 内存小说缓存
pub struct InMemoryNovelCache {
    entries: DashMap<String, String>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl InMemoryNovelCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }
}

impl Default for InMemoryNovelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NovelCachePort for InMemoryNovelCache {
    fn get(&self, cache_key: &str) -> Option<String> {
        match self.entries.get(cache_key) {
            Some(entry) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn put(&self, cache_key: &str, novel_text: String) {
        tracing::debug!(
            cache_key = %cache_key,
            novel_len = novel_text.len(),
            "Novel cached"
        );
        self.entries.insert(cache_key.to_string(), novel_text);
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }
}
