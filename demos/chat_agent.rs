//! Interactive chat agent.
//!
//! One agent chats with the user over the terminal, can report the
//! current time, and terminates with a closing message. Configure the
//! backend with LLM_MODEL, LLM_API_KEY, and LLM_BASE_URL.
//!
//! Run with: cargo run --example chat_agent

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;

use stratagem::action::library::{current_datetime, user_input};
use stratagem::agent::Agent;
use stratagem::config::Settings;
use stratagem::console::Console;
use stratagem::core::Goal;
use stratagem::language::FunctionCallingLanguage;
use stratagem::llm::OpenAiCompatModel;
use stratagem::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    let _guard = logging::init_from_settings(&settings);

    let model = Arc::new(OpenAiCompatModel::from_settings(&settings)?);

    let goals = vec![
        Goal::new(1, "Gather Information", "Ask the user what they need help with"),
        Goal::new(
            2,
            "Terminate",
            "Call terminate when the user is done, with a friendly closing message",
        ),
    ];

    let mut builder = Agent::builder(goals, Arc::new(FunctionCallingLanguage::new()), model)
        .with_name("chat_agent")
        .with_tools([user_input(), current_datetime()]);
    if let Some(secs) = settings.agent_sleep_secs.filter(|secs| *secs > 0) {
        builder = builder.with_step_delay(Duration::from_secs(secs));
    }
    let agent = builder.build();

    let properties: HashMap<String, Value> =
        [("time_zone".to_string(), Value::from("Europe/Berlin"))].into();

    let memory = agent
        .run("Hi! Ask me what I need help with.", None, Some(properties))
        .await?;

    Console::new().print_memory(memory.as_ref(), Some("Conversation transcript"));
    Ok(())
}
