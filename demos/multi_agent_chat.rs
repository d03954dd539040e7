//! Coordinator delegating to a chat specialist.
//!
//! The manager hands the whole conversation log to a specialist through
//! the shared-memory delegation policy. The specialist chats with the
//! user until they say goodbye, then the manager wraps up.
//!
//! Run with: cargo run --example multi_agent_chat

use std::sync::Arc;

use anyhow::Result;

use stratagem::action::library::user_input;
use stratagem::agent::{Agent, DelegationPolicy};
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
    let language = Arc::new(FunctionCallingLanguage::new());

    let specialist = Agent::builder(
        vec![
            Goal::new(1, "Chat", "Chat with the user about whatever they bring up"),
            Goal::new(
                2,
                "Terminate",
                "Call terminate with a short summary once the user says goodbye",
            ),
        ],
        language.clone(),
        model.clone(),
    )
    .with_name("chat_specialist")
    .with_description("Friendly conversationalist that chats until the user says goodbye")
    .with_tool(user_input())
    .build();

    let manager = Agent::builder(
        vec![
            Goal::new(1, "Delegate", "Hand the conversation to the chat specialist"),
            Goal::new(2, "Terminate", "Call terminate once the specialist is done"),
        ],
        language,
        model,
    )
    .with_name("manager")
    .with_managed_agents([specialist])
    .with_delegation(DelegationPolicy::MemoryHandoff)
    .build();

    let memory = manager.run("Chat with the user.", None, None).await?;

    Console::new().print_memory(memory.as_ref(), Some("Shared conversation log"));
    Ok(())
}
