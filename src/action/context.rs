//! Per-run context handle threaded through every tool call.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use uuid::Uuid;

use crate::agent::AgentRegistry;
use crate::llm::LanguageModel;
use crate::memory::SharedMemory;

/// Cross-cutting state for one agent run.
///
/// Tools receive the context by reference and read the conversation
/// log, the model handle, the sibling-agent registry, and any
/// caller-supplied properties from it. Properties stay writable through
/// a shared reference so a tool can leave notes for later turns.
pub struct ActionContext {
    context_id: String,
    properties: RwLock<HashMap<String, Value>>,
    memory: Option<SharedMemory>,
    model: Option<Arc<dyn LanguageModel>>,
    agents: Option<Arc<AgentRegistry>>,
}

impl ActionContext {
    pub fn new() -> Self {
        Self {
            context_id: Uuid::new_v4().to_string(),
            properties: RwLock::new(HashMap::new()),
            memory: None,
            model: None,
            agents: None,
        }
    }

    /// Attach the conversation log for this run.
    pub fn with_memory(mut self, memory: SharedMemory) -> Self {
        self.memory = Some(memory);
        self
    }

    /// Attach the model handle backing this run.
    pub fn with_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Attach the registry of agents available for delegation.
    pub fn with_agents(mut self, agents: Arc<AgentRegistry>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Set a single property.
    pub fn with_property(self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    /// Merge a map of caller-supplied properties.
    pub fn with_properties(self, properties: HashMap<String, Value>) -> Self {
        self.properties.write().unwrap().extend(properties);
        self
    }

    /// Unique identifier of this context.
    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    /// Read a property, cloning the stored value.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.properties.read().unwrap().get(key).cloned()
    }

    /// Read a property, falling back to a default.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Write a property.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.properties.write().unwrap().insert(key.into(), value);
    }

    /// Snapshot of all properties.
    pub fn properties(&self) -> HashMap<String, Value> {
        self.properties.read().unwrap().clone()
    }

    /// The conversation log for this run.
    pub fn memory(&self) -> Option<SharedMemory> {
        self.memory.clone()
    }

    /// The model handle backing this run.
    pub fn model(&self) -> Option<Arc<dyn LanguageModel>> {
        self.model.clone()
    }

    /// The registry of delegable agents, when this run belongs to a
    /// coordinator.
    pub fn agent_registry(&self) -> Option<Arc<AgentRegistry>> {
        self.agents.clone()
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self::new()
    }
}
