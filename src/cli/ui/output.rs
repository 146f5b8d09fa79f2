use console::style;

use crate::types::Advice;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Render advisory text. Fallback text is dimmed so an operator watching
    /// the terminal can tell a degraded answer from a generated one; the
    /// wording itself is identical to what the app would show.
    pub fn advice(&self, advice: &Advice) {
        match advice {
            Advice::Generated(text) => println!("{}", text),
            Advice::Fallback { text, .. } => println!("{}", style(*text).dim()),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
