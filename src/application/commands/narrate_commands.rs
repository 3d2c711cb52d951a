//! Narrate Commands - 朗读相关命令

use crate::application::ports::SpeechAudio;

/// 朗读当前章节命令
#[derive(Debug, Clone)]
pub struct NarrateChapterCommand {
    pub session_id: String,
}

/// 朗读响应
#[derive(Debug, Clone)]
pub struct NarrateChapterResponse {
    pub session_id: String,
    pub chapter_index: usize,
    pub audio: SpeechAudio,
}
