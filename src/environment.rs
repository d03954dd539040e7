//! Dispatch layer between a parsed tool call and the action's handler.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::{Action, ActionContext};

/// Timestamp format stamped on successful executions.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Uniform envelope describing one tool execution attempt. Serialized
/// into an environment memory entry after every loop iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub tool_executed: bool,
    /// Name of the executed action, `null` on failure.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Envelope for a completed execution.
    pub fn success(action: impl Into<String>, result: Value) -> Self {
        Self {
            tool_executed: true,
            action: Some(action.into()),
            result: Some(result),
            timestamp: Some(Local::now().format(TIMESTAMP_FORMAT).to_string()),
            error: None,
        }
    }

    /// Envelope for a failed or rejected execution.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            tool_executed: false,
            action: None,
            result: None,
            timestamp: None,
            error: Some(error.into()),
        }
    }
}

/// Executes actions and shields the control loop from tool faults.
#[derive(Debug, Clone, Default)]
pub struct Environment;

impl Environment {
    pub fn new() -> Self {
        Self
    }

    /// Run one action: inject context-bound parameters, execute the
    /// handler, and wrap the outcome in an envelope. Handler faults are
    /// captured, never propagated.
    pub async fn execute(
        &self,
        context: &ActionContext,
        action: &Action,
        args: &Value,
    ) -> ExecutionResult {
        let args = Self::inject_context_params(context, action, args);
        tracing::debug!("[Environment] Executing action: {}", action.name);
        match action.execute(context, args).await {
            Ok(result) => ExecutionResult::success(action.name.as_str(), result),
            Err(e) => {
                tracing::warn!("[Environment] Action '{}' failed: {}", action.name, e);
                ExecutionResult::failure(e.to_string())
            }
        }
    }

    /// Copy the model-supplied arguments and overwrite every declared
    /// context parameter that has a matching context property. Anything
    /// that is not a JSON object is treated as empty arguments.
    fn inject_context_params(context: &ActionContext, action: &Action, args: &Value) -> Value {
        let mut merged = match args {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        for name in &action.context_params {
            if let Some(value) = context.get(name) {
                merged.insert(name.clone(), value);
            }
        }
        Value::Object(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    fn echo() -> Action {
        Action::from_fn(
            "echo",
            "Echoes its arguments",
            json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string"},
                    "_secret": {"type": "string"}
                }
            }),
            |_, args| Ok(args),
        )
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let environment = Environment::new();
        let context = ActionContext::new();

        let outcome = environment
            .execute(&context, &echo(), &json!({"text": "hi"}))
            .await;

        assert!(outcome.tool_executed);
        assert_eq!(outcome.action.as_deref(), Some("echo"));
        assert_eq!(outcome.result, Some(json!({"text": "hi"})));
        assert!(outcome.error.is_none());
        // Timestamp looks like 2026-08-25T14:03:07+0200.
        let timestamp = outcome.timestamp.unwrap();
        assert_eq!(timestamp.len(), 24);
        assert_eq!(&timestamp[10..11], "T");
    }

    #[tokio::test]
    async fn test_failure_envelope_serializes_null_action() {
        let failing = Action::from_fn(
            "boom",
            "Always fails",
            json!({"type": "object", "properties": {}}),
            |_, _| Err(anyhow!("disk on fire")),
        );
        let environment = Environment::new();
        let context = ActionContext::new();

        let outcome = environment.execute(&context, &failing, &json!({})).await;

        assert!(!outcome.tool_executed);
        assert_eq!(outcome.action, None);
        assert_eq!(outcome.error.as_deref(), Some("disk on fire"));

        let rendered = serde_json::to_value(&outcome).unwrap();
        assert_eq!(rendered["action"], Value::Null);
        assert!(rendered.get("result").is_none());
        assert!(rendered.get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_context_params_overwrite_model_args() {
        let environment = Environment::new();
        let context = ActionContext::new().with_property("_secret", json!("from context"));

        let outcome = environment
            .execute(
                &context,
                &echo(),
                &json!({"text": "hi", "_secret": "from model"}),
            )
            .await;

        assert_eq!(
            outcome.result,
            Some(json!({"text": "hi", "_secret": "from context"}))
        );
    }

    #[tokio::test]
    async fn test_non_object_args_become_empty() {
        let environment = Environment::new();
        let context = ActionContext::new();

        let outcome = environment.execute(&context, &echo(), &Value::Null).await;

        assert!(outcome.tool_executed);
        assert_eq!(outcome.result, Some(json!({})));
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope: ExecutionResult = serde_json::from_str(
            r#"{"tool_executed": false, "action": null, "error": "nope"}"#,
        )
        .unwrap();
        assert!(!envelope.tool_executed);
        assert_eq!(envelope.action, None);
        assert_eq!(envelope.error.as_deref(), Some("nope"));
    }
}
