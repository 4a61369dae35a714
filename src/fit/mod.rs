//! Role-fit scoring.
//!
//! A job description is checked against an ordered table of role rules; the
//! first hit decides the score. Otherwise an additive keyword heuristic over
//! the candidate profile applies. Scores never exceed 97.

mod notes;
mod profile;
mod rules;
mod scorer;
mod tier;

pub use notes::*;
pub use profile::*;
pub use rules::*;
pub use scorer::*;
pub use tier::*;
