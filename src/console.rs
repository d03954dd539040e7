//! Terminal output for interactive runs: framed agent messages, user
//! input, and colored memory dumps.

use std::io::{self, BufRead, Write};

use colored::{Color, Colorize};

use crate::memory::{EntryKind, Memory};

const FRAME: &str = "------";

/// Colored console for chat-style sessions.
pub struct Console {
    user_color: Color,
    assistant_color: Color,
    environment_color: Color,
    other_color: Color,
}

impl Console {
    pub fn new() -> Self {
        Self {
            user_color: Color::Green,
            assistant_color: Color::Yellow,
            environment_color: Color::Cyan,
            other_color: Color::Red,
        }
    }

    fn entry_color(&self, kind: &EntryKind) -> Color {
        match kind {
            EntryKind::User => self.user_color,
            EntryKind::Assistant => self.assistant_color,
            EntryKind::Environment => self.environment_color,
            EntryKind::AgentThought(_) => self.other_color,
        }
    }

    /// Print the framed final message of a terminating agent.
    pub fn print_final_message(&self, agent_name: &str, message: &str) {
        println!("{FRAME}");
        println!("{}", format!("[FINAL MESSAGE ('{agent_name}')] {message}").blue());
        println!("{FRAME}");
    }

    /// Print a framed assistant message awaiting a user reply.
    pub fn print_assistant_message(&self, agent_name: &str, message: &str) {
        println!("{FRAME}");
        println!("{}", format!("[ASSISTANT ('{agent_name}')] {message}").yellow());
        println!("{FRAME}");
    }

    /// Read one line from stdin.
    pub fn read_input(&self) -> io::Result<String> {
        print!("{} ", ">".bold());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Dump a memory log, one framed block per entry.
    pub fn print_memory(&self, memory: &dyn Memory, info: Option<&str>) {
        if let Some(info) = info {
            let frame = "\u{2500}".repeat(info.chars().count());
            println!("{frame}");
            println!("{info}");
            println!("{frame}");
        }
        for entry in memory.get_all(None) {
            let label = entry.kind.to_string().to_uppercase();
            println!("{}", label.color(self.entry_color(&entry.kind)));
            println!("{}", "\u{2500}".repeat(label.chars().count()));
            println!("\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}> {}", entry.content);
            println!();
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
