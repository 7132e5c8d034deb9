//! LLM Provider layer
//!
//! OpenAI-compatible provider used for the single JSON-mode completion
//! behind each generation run.

mod client;
mod config;

pub use client::*;
pub use config::*;
