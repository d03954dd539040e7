//! Registry of the actions available to one agent.

use std::collections::HashMap;

use super::action::Action;

/// Ordered action lookup table.
///
/// Registration preserves first-seen order, and re-registering a name
/// replaces the action in place, so prompt rendering stays stable.
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<Action>,
    index: HashMap<String, usize>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of actions.
    pub fn from_actions(actions: Vec<Action>) -> Self {
        let mut registry = Self::new();
        for action in actions {
            registry.register(action);
        }
        registry
    }

    /// Add an action, replacing any existing action with the same name.
    pub fn register(&mut self, action: Action) {
        match self.index.get(&action.name) {
            Some(&slot) => {
                tracing::debug!("[ActionRegistry] Replacing action: {}", action.name);
                self.actions[slot] = action;
            }
            None => {
                tracing::debug!("[ActionRegistry] Registered action: {}", action.name);
                self.index.insert(action.name.clone(), self.actions.len());
                self.actions.push(action);
            }
        }
    }

    /// Look up an action by name.
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.index.get(name).map(|&slot| &self.actions[slot])
    }

    /// All actions in registration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// `name: description` pairs, used in feedback when the model picks
    /// a tool badly.
    pub fn catalog(&self) -> Vec<String> {
        self.actions
            .iter()
            .map(|action| format!("{}: {}", action.name, action.description))
            .collect()
    }

    /// Whether any registered action is terminal.
    pub fn has_terminal(&self) -> bool {
        self.actions.iter().any(|action| action.terminal)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str, description: &str) -> Action {
        Action::from_fn(
            name,
            description,
            json!({"type": "object", "properties": {}}),
            |_, args| Ok(args),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());

        registry.register(named("search", "Searches"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("search").unwrap().description, "Searches");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let mut registry = ActionRegistry::new();
        registry.register(named("first", "a"));
        registry.register(named("second", "b"));
        registry.register(named("first", "updated"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("first").unwrap().description, "updated");
        // The replaced action keeps its original slot.
        assert_eq!(registry.actions()[0].name, "first");
        assert_eq!(registry.actions()[1].name, "second");
    }

    #[test]
    fn test_catalog_and_terminal() {
        let registry = ActionRegistry::from_actions(vec![
            named("search", "Searches"),
            named("stop", "Stops").with_terminal(true),
        ]);

        assert_eq!(
            registry.catalog(),
            vec!["search: Searches".to_string(), "stop: Stops".to_string()]
        );
        assert!(registry.has_terminal());
    }
}
