//! Protocol for models with native tool calling.
//!
//! Tools travel as first-class declarations next to the messages, and
//! every response is expected to already be a bare JSON tool call.

use crate::action::Action;
use crate::agent::AgentSummary;
use crate::core::{format_goals, ChatMessage, Goal, LanguageError, Prompt, ToolSpec};
use crate::memory::Memory;

use super::{format_agents, memory_messages, AgentLanguage, ToolCall};

/// Language for models that emit structured tool calls.
#[derive(Debug, Clone, Default)]
pub struct FunctionCallingLanguage;

impl FunctionCallingLanguage {
    pub fn new() -> Self {
        Self
    }
}

impl AgentLanguage for FunctionCallingLanguage {
    fn construct_prompt(
        &self,
        actions: &[Action],
        goals: &[Goal],
        memory: &dyn Memory,
        agents: &[AgentSummary],
    ) -> Prompt {
        let system = format!("{}{}", format_goals(goals), format_agents(agents));
        let mut messages = vec![ChatMessage::system(system)];
        messages.extend(memory_messages(memory));
        let tools = actions.iter().map(ToolSpec::from_action).collect();
        Prompt::new(messages).with_tools(tools)
    }

    fn parse_response(&self, response: Option<&str>) -> Result<ToolCall, LanguageError> {
        let raw = response.ok_or(LanguageError::ResponseMissing)?;
        serde_json::from_str(raw).map_err(|_| {
            LanguageError::NoActionInResponse(
                "No tool call specified, please provide a tool call".to_string(),
            )
        })
    }
}
