//! Greeting tool.

/// Greet `name`.
pub fn greet(name: &str) -> String {
    format!("Hello, {name}! 👋")
}
