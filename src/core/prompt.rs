//! Prompt assembly types shared by agent languages and model transports.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;

/// Maximum tool description length forwarded to the model.
const MAX_TOOL_DESCRIPTION_LEN: usize = 1024;

/// Chat role attached to a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message in model wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// First-class tool declaration for models with native tool calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSpec {
    /// Build a declaration from an action, truncating oversized
    /// descriptions to what providers accept.
    pub fn from_action(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            description: action.description.chars().take(MAX_TOOL_DESCRIPTION_LEN).collect(),
            parameters: action.parameters.clone(),
        }
    }
}

/// Everything a model transport needs for one completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub messages: Vec<ChatMessage>,
    /// Tool declarations, present only for tool-calling languages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,
}

impl Prompt {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            tools: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = Some(tools);
        self
    }
}
