//! Agent languages: the protocol layer between an agent and its model.
//!
//! A language renders goals, tools, and memory into a prompt and parses
//! the raw response back into a tool call. Two protocols ship with the
//! crate: [`FunctionCallingLanguage`] for models with native tool
//! calling and [`JsonActionLanguage`] for plain-text models.

pub mod function_calling;
pub mod json_action;

pub use function_calling::FunctionCallingLanguage;
pub use json_action::JsonActionLanguage;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;
use crate::agent::AgentSummary;
use crate::core::{ChatMessage, Goal, LanguageError, Prompt};
use crate::memory::{EntryKind, Memory};

/// A parsed decision: which tool to run and with what arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: Value,
}

/// Protocol between an agent and its model.
pub trait AgentLanguage: Send + Sync {
    /// Render goals, actions, memory, and managed-agent descriptions
    /// into one prompt.
    fn construct_prompt(
        &self,
        actions: &[Action],
        goals: &[Goal],
        memory: &dyn Memory,
        agents: &[AgentSummary],
    ) -> Prompt;

    /// Extract a tool call from the raw model response.
    fn parse_response(&self, response: Option<&str>) -> Result<ToolCall, LanguageError>;
}

/// Map memory entries to chat messages. Assistant entries keep the
/// assistant role; user, environment, and thought entries are all
/// presented as user input. Entries with empty content are serialized
/// whole so nothing drops silently.
pub(crate) fn memory_messages(memory: &dyn Memory) -> Vec<ChatMessage> {
    memory
        .get_all(None)
        .into_iter()
        .map(|entry| {
            let content = if entry.content.is_empty() {
                serde_json::to_string(&entry).unwrap_or_default()
            } else {
                entry.content.clone()
            };
            match entry.kind {
                EntryKind::Assistant => ChatMessage::assistant(content),
                _ => ChatMessage::user(content),
            }
        })
        .collect()
}

/// Render managed-agent descriptions for the system prompt. Empty when
/// the agent manages nothing.
pub(crate) fn format_agents(agents: &[AgentSummary]) -> String {
    if agents.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = agents
        .iter()
        .map(|agent| format!("- {}: {}", agent.name, agent.description))
        .collect();
    format!("\nAvailable Agents: \n{}\n", lines.join("\n"))
}
