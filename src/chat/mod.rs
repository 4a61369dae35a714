//! Conversation handling on top of the matcher and scorer.

mod context;
mod engine;
pub mod fallback;
mod reply;

pub use context::*;
pub use engine::*;
pub use reply::*;
