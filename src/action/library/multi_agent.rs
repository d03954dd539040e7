//! Delegation actions for agents that manage other agents.
//!
//! All three policies expose the same tool surface (`call_agent`) and
//! differ only in how memory moves between caller and callee.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::action::{Action, ActionContext, ToolHandler};
use crate::agent::Agent;
use crate::core::AgentError;
use crate::memory::MemoryEntry;

/// Tool name shared by every delegation policy.
pub const CALL_AGENT: &str = "call_agent";

fn call_agent_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "agent_name": {
                "type": "string",
                "description": "Name of the agent to run"
            },
            "task": {
                "type": "string",
                "description": "The task the agent should perform"
            }
        },
        "required": ["agent_name", "task"]
    })
}

fn parse_args(args: &Value) -> Result<(String, String)> {
    let agent_name = args
        .get("agent_name")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("call_agent requires an 'agent_name' argument"))?
        .to_string();
    let task = args
        .get("task")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("call_agent requires a 'task' argument"))?
        .to_string();
    Ok((agent_name, task))
}

/// Look the target agent up in the caller's registry. Configuration
/// faults propagate, so they surface as environment failure envelopes
/// rather than delegation results.
fn resolve_agent(context: &ActionContext, name: &str) -> Result<Arc<Agent>> {
    let registry = context
        .agent_registry()
        .ok_or(AgentError::MissingAgentRegistry)?;
    let agent = registry.get(name).ok_or_else(|| AgentError::UnknownAgent {
        name: name.to_string(),
        available: registry.names(),
    })?;
    Ok(agent)
}

fn delegation_success(agent_name: &str, result: &str) -> Value {
    json!({
        "success": true,
        "agent": agent_name,
        "result": result,
    })
}

fn delegation_fault(agent_name: &str, error: impl std::fmt::Display) -> Value {
    json!({
        "success": false,
        "error": error.to_string(),
        "agent": agent_name,
    })
}

struct MessagePassing;

#[async_trait]
impl ToolHandler for MessagePassing {
    async fn call(&self, context: &ActionContext, args: Value) -> Result<Value> {
        let (agent_name, task) = parse_args(&args)?;
        let agent = resolve_agent(context, &agent_name)?;
        tracing::info!("[Delegation] Running '{}' on a fresh memory", agent_name);
        match agent.run(task, None, None).await {
            Ok(memory) => Ok(match memory.last() {
                Some(entry) => delegation_success(&agent_name, &entry.content),
                None => delegation_fault(&agent_name, "Agent failed to run."),
            }),
            Err(e) => Ok(delegation_fault(&agent_name, e)),
        }
    }
}

struct Reflection;

#[async_trait]
impl ToolHandler for Reflection {
    async fn call(&self, context: &ActionContext, args: Value) -> Result<Value> {
        let (agent_name, task) = parse_args(&args)?;
        let agent = resolve_agent(context, &agent_name)?;
        let caller_memory = context
            .memory()
            .ok_or_else(|| anyhow!("no caller memory in context"))?;
        tracing::info!("[Delegation] Running '{}' with reflection", agent_name);
        match agent.run(task, None, None).await {
            Ok(memory) => {
                let entries = memory.get_all(None);
                for entry in &entries {
                    caller_memory.add(MemoryEntry::agent_thought(
                        agent_name.as_str(),
                        entry.content.as_str(),
                    ));
                }
                Ok(match entries.last() {
                    Some(last) => {
                        let mut result = delegation_success(&agent_name, &last.content);
                        result["memories_added"] = json!(entries.len());
                        result
                    }
                    None => delegation_fault(&agent_name, "Agent failed to run."),
                })
            }
            Err(e) => Ok(delegation_fault(&agent_name, e)),
        }
    }
}

struct MemoryHandoff;

#[async_trait]
impl ToolHandler for MemoryHandoff {
    async fn call(&self, context: &ActionContext, args: Value) -> Result<Value> {
        let (agent_name, task) = parse_args(&args)?;
        let agent = resolve_agent(context, &agent_name)?;
        let memory = context
            .memory()
            .ok_or_else(|| anyhow!("no caller memory in context"))?;
        tracing::info!("[Delegation] Handing caller memory to '{}'", agent_name);
        match agent.run(task, Some(memory), None).await {
            Ok(memory) => Ok(match memory.last() {
                Some(entry) => delegation_success(&agent_name, &entry.content),
                None => delegation_fault(&agent_name, "Agent failed to run."),
            }),
            Err(e) => Ok(delegation_fault(&agent_name, e)),
        }
    }
}

/// Delegation where the callee runs on a private log and only its final
/// entry comes back to the caller.
pub fn call_agent_message_passing() -> Action {
    Action::new(
        CALL_AGENT,
        "Runs another agent on a task and returns that agent's final answer.",
        call_agent_schema(),
        Arc::new(MessagePassing),
    )
}

/// Like message passing, but the callee's whole log is also copied into
/// the caller's memory as tagged thought entries.
pub fn call_agent_with_reflection() -> Action {
    Action::new(
        CALL_AGENT,
        "Runs another agent on a task, keeps its full reasoning in memory, \
         and returns that agent's final answer.",
        call_agent_schema(),
        Arc::new(Reflection),
    )
}

/// Delegation where the callee works directly on the caller's log.
pub fn call_agent_memory_handoff() -> Action {
    Action::new(
        CALL_AGENT,
        "Hands the conversation over to another agent and returns its final \
         answer once it is done.",
        call_agent_schema(),
        Arc::new(MemoryHandoff),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_policies_share_one_tool_name() {
        for action in [
            call_agent_message_passing(),
            call_agent_with_reflection(),
            call_agent_memory_handoff(),
        ] {
            assert_eq!(action.name, CALL_AGENT);
            assert!(!action.terminal);
            let properties = action.parameters["properties"].as_object().unwrap();
            assert!(properties.contains_key("agent_name"));
            assert!(properties.contains_key("task"));
        }
    }

    #[test]
    fn test_parse_args_requires_both_fields() {
        let (agent, task) =
            parse_args(&json!({"agent_name": "billing", "task": "refund"})).unwrap();
        assert_eq!(agent, "billing");
        assert_eq!(task, "refund");

        assert!(parse_args(&json!({"agent_name": "billing"})).is_err());
        assert!(parse_args(&json!({"task": "refund"})).is_err());
    }

    #[tokio::test]
    async fn test_missing_registry_is_a_configuration_fault() {
        let context = ActionContext::new();
        let action = call_agent_message_passing();

        let err = action
            .execute(&context, json!({"agent_name": "billing", "task": "refund"}))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No agent registry"));
    }
}
