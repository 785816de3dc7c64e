//! `localagent tools` — List the built-in tools.

use localagent_core::tool::ToolRegistry;

pub fn run() {
    let registry = localagent_tools::default_registry();
    println!("🧰 Available Tools");
    println!("==================\n");
    print!("{}", render(&registry));
}

/// One block per tool: icon and name, description, directive example.
pub fn render(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for tool in registry.list() {
        out.push_str(&format!("  {} {}\n", tool.icon(), tool.name()));
        out.push_str(&format!("     {}\n", tool.description()));
        out.push_str(&format!(
            "     usage: USE_TOOL:{}:<{}>\n\n",
            tool.name(),
            tool.argument_hint()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_tool() {
        let text = render(&localagent_tools::default_registry());
        assert!(text.contains("👋 say_hello"));
        assert!(text.contains("Gets weather information for a location"));
        assert!(text.contains("usage: USE_TOOL:search_web:<query>"));
        assert!(text.contains("run_code"));
    }
}
