//! Protocol for plain-text models.
//!
//! Tool documentation is embedded in the system prompt, and the model
//! is asked to answer with a fenced JSON block naming the tool to run.
//! Narration around the block is tolerated and ignored.

use regex::Regex;
use serde_json::json;

use crate::action::Action;
use crate::agent::AgentSummary;
use crate::core::{format_goals, ChatMessage, Goal, LanguageError, Prompt};
use crate::memory::Memory;

use super::{format_agents, memory_messages, AgentLanguage, ToolCall};

/// Response template shown to the model in the system prompt.
const ACTION_FORMAT: &str = r#"
<Stop and think step by step. Insert your thoughts here.>

```action
{
    "tool": "tool_name",
    "args": {...fill in arguments...}
}
```"#;

/// Fence labels accepted when scanning a response, tried in order. The
/// empty label matches an unlabeled fence.
const FENCE_LABELS: [&str; 5] = ["action", "tool", "tool_code", "tool_call", ""];

/// Language for models without native tool calling.
#[derive(Debug, Clone, Default)]
pub struct JsonActionLanguage;

impl JsonActionLanguage {
    pub fn new() -> Self {
        Self
    }

    /// Extract the interior of the first fenced block with this label.
    /// Returns None when no such block opens and closes properly.
    fn fenced_block<'a>(response: &'a str, label: &str) -> Option<&'a str> {
        let start = if label.is_empty() {
            // An unlabeled fence is backticks directly followed by a
            // line break.
            let fence = Regex::new(r"```[ \t]*\r?\n").ok()?;
            fence.find(response)?.end()
        } else {
            let marker = format!("```{label}");
            response.find(&marker)? + marker.len()
        };
        let rest = &response[start..];
        let end = rest.find("```")?;
        Some(rest[..end].trim())
    }
}

impl AgentLanguage for JsonActionLanguage {
    fn construct_prompt(
        &self,
        actions: &[Action],
        goals: &[Goal],
        memory: &dyn Memory,
        agents: &[AgentSummary],
    ) -> Prompt {
        let descriptions: Vec<serde_json::Value> = actions
            .iter()
            .map(|action| {
                json!({
                    "name": action.name,
                    "description": action.description,
                    "args": action.parameters,
                })
            })
            .collect();
        let tool_text = format!(
            "\nAvailable Tools: {}\n\n{}\n",
            serde_json::to_string_pretty(&descriptions).unwrap_or_default(),
            ACTION_FORMAT
        );
        let system = format!(
            "{}{}{}",
            format_goals(goals),
            format_agents(agents),
            tool_text
        );
        let mut messages = vec![ChatMessage::system(system)];
        messages.extend(memory_messages(memory));
        Prompt::new(messages)
    }

    fn parse_response(&self, response: Option<&str>) -> Result<ToolCall, LanguageError> {
        let raw = response.ok_or(LanguageError::ResponseMissing)?.trim();
        for label in FENCE_LABELS {
            if let Some(interior) = Self::fenced_block(raw, label) {
                if let Ok(call) = serde_json::from_str::<ToolCall>(interior) {
                    return Ok(call);
                }
            }
        }
        Err(LanguageError::NoActionInResponse(
            "No action found in response. Please provide an appropriate action.".to_string(),
        ))
    }
}
