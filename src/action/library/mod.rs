//! Stock actions shipped with the runtime.

pub mod default;
pub mod multi_agent;

pub use default::{current_datetime, terminate, user_input};
pub use multi_agent::{
    call_agent_memory_handoff, call_agent_message_passing, call_agent_with_reflection, CALL_AGENT,
};
