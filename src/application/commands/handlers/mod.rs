//! Command Handlers

mod narrate_handlers;
mod session_command_handlers;

pub use narrate_handlers::NarrateChapterHandler;
pub use session_command_handlers::{
    CloseSessionHandler, GenerateNovelHandler, NavigateHandler, OpenSessionHandler,
};
