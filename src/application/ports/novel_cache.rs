//! Novel Cache Port - 生成结果缓存
//!
//! 对生成调用的直接记忆化：key 为 (体裁, 用户开头, 章节数) 三元组，
//! 进程生命周期内有效，无淘汰、无失效。昂贵的是远程生成调用本身，
//! 精确相等的记忆化即已足够。

use crate::domain::Genre;

/// 生成请求三元组，逐字作为缓存 key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationRequest {
    pub genre: Genre,
    pub user_prompt: String,
    pub chapter_count: u8,
}

impl GenerationRequest {
    pub fn new(genre: Genre, user_prompt: impl Into<String>, chapter_count: u8) -> Self {
        Self {
            genre,
            user_prompt: user_prompt.into(),
            chapter_count,
        }
    }
}

/// 缓存统计信息
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// Novel Cache Port
///
/// 进程级别的小说文本缓存。实现必须可在并发会话下安全使用
pub trait NovelCachePort: Send + Sync {
    /// 查找缓存的小说文本（命中时逐字返回首次生成的结果）
    fn get(&self, cache_key: &str) -> Option<String>;

    /// 存入生成结果
    fn put(&self, cache_key: &str, novel_text: String);

    /// 获取缓存统计信息
    fn stats(&self) -> CacheStats;
}

/// 生成缓存 key
///
/// 对请求三元组的规范编码取 md5。字段之间用 `\x1f` 分隔，
/// 避免 ("a", "bc") 与 ("ab", "c") 产生相同编码
pub fn generate_cache_key(request: &GenerationRequest) -> String {
    let canonical = format!(
        "{}\x1f{}\x1f{}",
        request.genre.slug(),
        request.user_prompt,
        request.chapter_count
    );
    let digest = md5::compute(canonical.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_requests_share_key() {
        let a = GenerationRequest::new(Genre::Fantasy, "Once upon a time", 3);
        let b = GenerationRequest::new(Genre::Fantasy, "Once upon a time", 3);
        assert_eq!(generate_cache_key(&a), generate_cache_key(&b));
    }

    #[test]
    fn test_different_fields_change_key() {
        let base = GenerationRequest::new(Genre::Fantasy, "Once", 3);

        let other_genre = GenerationRequest::new(Genre::Horror, "Once", 3);
        let other_prompt = GenerationRequest::new(Genre::Fantasy, "Twice", 3);
        let other_count = GenerationRequest::new(Genre::Fantasy, "Once", 4);

        assert_ne!(generate_cache_key(&base), generate_cache_key(&other_genre));
        assert_ne!(generate_cache_key(&base), generate_cache_key(&other_prompt));
        assert_ne!(generate_cache_key(&base), generate_cache_key(&other_count));
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        // 前缀移位不能得到相同 key
        let a = GenerationRequest::new(Genre::Fantasy, "ab", 3);
        let b = GenerationRequest::new(Genre::Fantasy, "a", 3);
        assert_ne!(generate_cache_key(&a), generate_cache_key(&b));
    }
}
