//! Built-in actions available to every agent.

use chrono::Local;
use serde_json::{json, Value};

use crate::action::{Action, ActionContext};
use crate::console::Console;

fn agent_name(context: &ActionContext) -> String {
    context
        .get("name")
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn string_arg(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Terminal action ending the run with a final message.
///
/// The message is printed for the operator and returned unchanged so it
/// also lands in the execution envelope.
pub fn terminate() -> Action {
    Action::from_fn(
        "terminate",
        "Terminates the conversation and delivers a final message to the user. \
         No more actions can be taken once this is called.",
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The final message to deliver before stopping"
                }
            },
            "required": ["message"]
        }),
        |context, args| {
            let message = string_arg(&args, "message");
            Console::new().print_final_message(&agent_name(context), &message);
            tracing::debug!("[Tools] Terminate message: '{}'", message);
            Ok(Value::String(message))
        },
    )
    .with_terminal(true)
}

/// Show the user a message and return their reply.
pub fn user_input() -> Action {
    Action::from_fn(
        "user_input",
        "Sends a message to the user and waits for their reply. \
         Use this to chat with the user or ask follow-up questions.",
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The message to show the user"
                }
            },
            "required": ["message"]
        }),
        |context, args| {
            let message = string_arg(&args, "message");
            let console = Console::new();
            console.print_assistant_message(&agent_name(context), &message);
            let reply = console.read_input()?;
            Ok(Value::String(reply))
        },
    )
}

/// Report the current local date and time.
///
/// The reported zone label comes from the `time_zone` context property
/// when the caller set one, then from the hidden `_default_tz`
/// parameter, and finally falls back to "local".
pub fn current_datetime() -> Action {
    Action::from_fn(
        "get_current_date_and_time",
        "Returns the current date and time.",
        json!({
            "type": "object",
            "properties": {
                "_default_tz": {
                    "type": "string",
                    "description": "Fallback time zone label"
                }
            }
        }),
        |context, args| {
            let zone = context
                .get("time_zone")
                .and_then(|value| value.as_str().map(str::to_string))
                .or_else(|| args.get("_default_tz").and_then(|v| v.as_str().map(str::to_string)))
                .unwrap_or_else(|| "local".to_string());
            let now = Local::now();
            Ok(Value::String(format!(
                "Current time: {} ({})",
                now.format("%H:%M %A, %B %d, %Y"),
                zone
            )))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_terminate_is_terminal_and_echoes_message() {
        let action = terminate();
        assert!(action.terminal);

        let context = ActionContext::new().with_property("name", json!("chat"));
        let result = action
            .execute(&context, json!({"message": "All done. Bye"}))
            .await
            .unwrap();

        assert_eq!(result, json!("All done. Bye"));
    }

    #[test]
    fn test_current_datetime_hides_the_default_zone() {
        let action = current_datetime();

        let properties = action.parameters["properties"].as_object().unwrap();
        assert!(!properties.contains_key("_default_tz"));
        assert_eq!(action.context_params, vec!["_default_tz".to_string()]);
    }

    #[tokio::test]
    async fn test_current_datetime_prefers_context_time_zone() {
        let action = current_datetime();
        let context = ActionContext::new().with_property("time_zone", json!("Europe/Berlin"));

        let result = action
            .execute(&context, json!({"_default_tz": "UTC"}))
            .await
            .unwrap();

        let text = result.as_str().unwrap();
        assert!(text.starts_with("Current time: "));
        assert!(text.ends_with("(Europe/Berlin)"));
    }

    #[tokio::test]
    async fn test_current_datetime_falls_back_to_injected_default() {
        let action = current_datetime();
        let context = ActionContext::new();

        let result = action
            .execute(&context, json!({"_default_tz": "UTC"}))
            .await
            .unwrap();
        assert!(result.as_str().unwrap().ends_with("(UTC)"));

        let result = action.execute(&context, json!({})).await.unwrap();
        assert!(result.as_str().unwrap().ends_with("(local)"));
    }

    #[test]
    fn test_user_input_is_not_terminal() {
        assert!(!user_input().terminal);
    }
}
