//! List Gemini models, pick one that can generate content, and ask it a question.

pub mod client;
pub mod error;
mod http_response;
pub mod logging;
pub mod models;
pub mod quickstart;
pub mod report;
pub mod selector;

#[cfg(test)]
mod test_support;

pub use genai_quickstart_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
pub use quickstart::{Quickstart, QuickstartOutcome, DEFAULT_PROMPT};
pub use selector::{ModelSelector, DEFAULT_PREFERRED_MODELS};
