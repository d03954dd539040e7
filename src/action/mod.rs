//! Actions: the tools an agent can invoke, their registry, and the
//! per-run context they execute against.

pub mod action;
pub mod context;
pub mod library;
pub mod registry;

pub use action::{Action, ToolHandler};
pub use context::ActionContext;
pub use registry::ActionRegistry;
