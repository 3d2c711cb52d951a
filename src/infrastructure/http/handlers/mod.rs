//! HTTP Handlers

mod genre;
mod narrate;
mod novel;
mod ping;
mod session;

pub use genre::list_genres;
pub use narrate::narrate_chapter;
pub use novel::{download_novel, generate_novel, get_chapter, get_novel};
pub use ping::ping;
pub use session::{close_session, goto_chapter, next_chapter, open_session, previous_chapter};
