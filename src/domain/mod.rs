//! Domain Layer - 领域层
//!
//! 纯逻辑，无 I/O：
//! - chapter: 章节分割与朗读文本提取
//! - genre: 体裁枚举与描述表

pub mod chapter;
pub mod genre;

pub use chapter::{extract_title, narration_text, split_into_chapters, CHAPTER_MARKER};
pub use genre::Genre;
