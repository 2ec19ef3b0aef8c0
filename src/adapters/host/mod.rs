//! Host-side adapters: content lookup, operator notices, localization.

mod content;
mod localization;
mod notice_board;

pub use content::StaticContentContext;
pub use localization::EnglishLocalizer;
pub use notice_board::InMemoryNoticeBoard;
