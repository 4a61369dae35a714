//! Portfolio Bot - answers questions about a designer's portfolio and scores
//! how well job descriptions fit their profile.

pub mod ai;
pub mod chat;
pub mod config;
pub mod display;
pub mod fit;
pub mod knowledge;
pub mod matcher;
pub mod server;
