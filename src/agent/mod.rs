//! Agents and the registry coordinators use to reach them.

pub mod agent;
pub mod registry;

pub use agent::{Agent, AgentBuilder, DelegationPolicy};
pub use registry::{AgentRegistry, AgentSummary};
