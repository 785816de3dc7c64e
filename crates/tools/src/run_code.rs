//! Code tool — echoes the submitted code.
//!
//! Nothing is executed. A real interpreter can be put behind the same
//! `Tool` contract without touching the dispatcher.

/// Render `code` as if it had been run.
pub fn simulate(code: &str) -> String {
    format!("Code executed:\n```python\n{code}\n```\nOutput: Simulated execution result")
}
