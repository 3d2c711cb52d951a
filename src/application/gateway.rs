//! Novel Generation Gateway
//!
//! 封装对远程文本生成服务的调用：构造提示词、查询/写入记忆化缓存、
//! 返回生成的 markdown 文本。失败通过类型化的 `GenerationError`
//! 返回，不使用哨兵字符串。

use std::sync::Arc;

use crate::application::ports::{
    generate_cache_key, CompletionRequest, GenerationError, GenerationRequest, NovelCachePort,
    TextGeneratorPort,
};
use crate::domain::Genre;

/// 构造 system 提示词
///
/// 约束输出结构：指定章节数、`"## Chapter X: Title"` 标题格式、
/// 完整叙事弧线、markdown 格式
pub fn build_system_instruction(genre: Genre, chapter_count: u8) -> String {
    format!(
        "You are a creative novelist. Write a well-structured {} novel in {} chapters. \
         Each chapter must start with '## Chapter X: Title'. \
         Ensure the story has a beginning, middle, and ending. Use markdown format.",
        genre, chapter_count
    )
}

/// 构造 user 提示词
///
/// 嵌入体裁、静态体裁描述，以及非空白时的用户自定义开头
pub fn build_user_instruction(genre: Genre, user_prompt: &str) -> String {
    let mut instruction = format!(
        "Genre: {}\nDescription: {}\n",
        genre,
        genre.description()
    );
    let opening = user_prompt.trim();
    if !opening.is_empty() {
        instruction.push_str(&format!("User Prompt: {}", opening));
    }
    instruction
}

/// Novel Generation Gateway
///
/// 生成调用的唯一入口。相同请求三元组在进程生命周期内只触发
/// 一次远程调用，此后逐字返回缓存结果
pub struct NovelGateway {
    generator: Arc<dyn TextGeneratorPort>,
    cache: Arc<dyn NovelCachePort>,
}

impl NovelGateway {
    pub fn new(generator: Arc<dyn TextGeneratorPort>, cache: Arc<dyn NovelCachePort>) -> Self {
        Self { generator, cache }
    }

    /// 生成一部小说
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let cache_key = generate_cache_key(request);

        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::info!(
                cache_key = %cache_key,
                genre = %request.genre,
                chapter_count = request.chapter_count,
                "Novel cache hit"
            );
            return Ok(cached);
        }

        let completion = CompletionRequest {
            system: build_system_instruction(request.genre, request.chapter_count),
            user: build_user_instruction(request.genre, &request.user_prompt),
        };

        tracing::info!(
            genre = %request.genre,
            chapter_count = request.chapter_count,
            prompt_len = request.user_prompt.len(),
            "Requesting novel generation"
        );

        let response = self.generator.complete(completion).await?;

        tracing::info!(
            genre = %request.genre,
            model = ?response.model,
            total_tokens = ?response.total_tokens,
            novel_len = response.content.len(),
            "Novel generation completed"
        );

        self.cache.put(&cache_key, response.content.clone());

        Ok(response.content)
    }
}
