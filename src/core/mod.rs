//! Core types for the agent runtime
//!
//! This module provides the fundamental types used throughout the crate:
//! - `Goal` - One objective given to an agent
//! - `Prompt` / `ChatMessage` / `ToolSpec` - Model-facing prompt types
//! - `AgentError` / `LanguageError` - Error types

pub mod error;
pub mod goal;
pub mod prompt;

pub use error::{AgentError, AgentResult, LanguageError};
pub use goal::{format_goals, Goal};
pub use prompt::{ChatMessage, Prompt, Role, ToolSpec};
