//! Generative fallback: free-form answers and role analysis.

mod client;
mod prompts;

pub use client::*;
pub use prompts::{
    assistant_system_prompt, format_question, format_role_analysis, ROLE_ANALYST_SYSTEM_PROMPT,
};
