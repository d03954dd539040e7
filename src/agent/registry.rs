//! Registry of agents available for delegation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::agent::Agent;

/// Name and description pair advertised in coordinator prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
}

/// Lookup table of managed agents.
///
/// Built once when the owning agent is constructed and read-only from
/// then on. Registration order is preserved for prompt rendering, and a
/// repeated name replaces the earlier agent in place.
pub struct AgentRegistry {
    agents: Vec<Arc<Agent>>,
    index: HashMap<String, usize>,
}

impl AgentRegistry {
    pub fn new(agents: Vec<Agent>) -> Self {
        let mut registry = Self {
            agents: Vec::new(),
            index: HashMap::new(),
        };
        for agent in agents {
            registry.insert(Arc::new(agent));
        }
        registry
    }

    fn insert(&mut self, agent: Arc<Agent>) {
        let name = agent.name().to_string();
        match self.index.get(&name) {
            Some(&slot) => self.agents[slot] = agent,
            None => {
                self.index.insert(name, self.agents.len());
                self.agents.push(agent);
            }
        }
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<Arc<Agent>> {
        self.index.get(name).map(|&slot| self.agents[slot].clone())
    }

    /// Registered agent names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.agents
            .iter()
            .map(|agent| agent.name().to_string())
            .collect()
    }

    /// Name and description of every registered agent.
    pub fn summaries(&self) -> Vec<AgentSummary> {
        self.agents
            .iter()
            .map(|agent| AgentSummary {
                name: agent.name().to_string(),
                description: agent.description(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
