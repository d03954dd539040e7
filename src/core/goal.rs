//! Agent goals and their prompt rendering.

use serde::{Deserialize, Serialize};

/// Separator drawn around each goal description in the system prompt.
const GOAL_SEPARATOR: &str = "\n-------------------\n";

/// One objective given to an agent.
///
/// Goals are rendered into the system prompt in ascending priority
/// order, so lower numbers surface first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub priority: i32,
    pub name: String,
    pub description: String,
}

impl Goal {
    pub fn new(priority: i32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            priority,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Render goals as a prompt preamble, sorted by ascending priority.
/// Goals sharing a priority keep their list order.
pub fn format_goals(goals: &[Goal]) -> String {
    let mut ordered: Vec<&Goal> = goals.iter().collect();
    ordered.sort_by_key(|g| g.priority);
    ordered
        .iter()
        .map(|g| format!("{}:{}{}{}", g.name, GOAL_SEPARATOR, g.description, GOAL_SEPARATOR))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_goals_sorts_by_priority() {
        let goals = vec![
            Goal::new(2, "Terminate", "Stop when asked"),
            Goal::new(1, "Chat", "Talk to the user"),
        ];

        let rendered = format_goals(&goals);

        let chat = rendered.find("Chat:").unwrap();
        let terminate = rendered.find("Terminate:").unwrap();
        assert!(chat < terminate);
    }

    #[test]
    fn test_format_goals_separators() {
        let goals = vec![Goal::new(1, "Chat", "Talk to the user")];

        let rendered = format_goals(&goals);

        assert!(rendered.starts_with("Chat:\n-------------------\n"));
        assert!(rendered.contains("Talk to the user"));
        assert!(rendered.ends_with("\n-------------------\n"));
    }

    #[test]
    fn test_format_goals_ties_keep_list_order() {
        let goals = vec![
            Goal::new(1, "First", "a"),
            Goal::new(1, "Second", "b"),
        ];

        let rendered = format_goals(&goals);

        assert!(rendered.find("First:").unwrap() < rendered.find("Second:").unwrap());
    }

    #[test]
    fn test_format_goals_empty() {
        assert_eq!(format_goals(&[]), "");
    }
}
