//! Wire and row types for pastebin posts

pub mod outcome;
pub mod post;
pub mod text;

pub use outcome::CommandOutcome;
pub use post::Post;
pub use text::LooseText;
