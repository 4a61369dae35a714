//! Knowledge matcher.
//!
//! Maps a free-text question to the most relevant Q&A entry, and searches
//! project records by keyword.

mod intent;
mod normalize;
mod projects;
mod scoring;
mod semantic;

pub use intent::*;
pub use normalize::*;
pub use projects::*;
pub use scoring::*;
pub use semantic::*;
