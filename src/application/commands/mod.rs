//! Application Commands - CQRS 命令及处理器

pub mod handlers;
mod narrate_commands;
mod session_commands;

pub use narrate_commands::{NarrateChapterCommand, NarrateChapterResponse};
pub use session_commands::{
    CloseSessionCommand, CloseSessionResponse, GenerateNovelCommand, GenerateNovelResponse,
    NavigateCommand, NavigateResponse, NavigationTarget, OpenSessionCommand, OpenSessionResponse,
};
