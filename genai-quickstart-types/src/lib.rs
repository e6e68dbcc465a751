//! Gemini quickstart 的共享类型。

pub mod content;
pub mod enums;
pub mod http;
pub mod models;
pub mod response;
