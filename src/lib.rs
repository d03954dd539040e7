//! Agent orchestration runtime built around an explicit control cycle:
//! render the prompt from goals, tools, and memory, ask the model to
//! decide, dispatch the chosen tool through the environment, and record
//! the outcome back into memory until a terminal tool fires or the
//! iteration cap runs out.
//!
//! Delegation is just another tool: agents can hand work to managed
//! sub-agents with message-passing, reflection, or shared-memory
//! semantics.

// Core vocabulary: errors, goals, prompts
pub mod core;

// Conversation memory
pub mod memory;

// Tools and their execution context
pub mod action;

// Tool dispatch and result envelopes
pub mod environment;

// Prompt construction and response parsing protocols
pub mod language;

// Model transports
pub mod llm;

// The agent loop, builder, and registry
pub mod agent;

// Environment-driven settings
pub mod config;

// Structured logging setup
pub mod logging;

// Interactive terminal output
pub mod console;
