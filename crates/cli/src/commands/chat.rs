//! `localagent chat` — Interactive or single-message chat mode.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use localagent_agent::TurnOrchestrator;
use localagent_core::event::EventBus;
use localagent_core::message::{Conversation, Role, Turn};
use localagent_core::tool::ToolRegistry;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::{Overrides, load_config};

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Message(&'a str),
    Tools,
    History,
    Stats,
    Clear,
    Save(&'a str),
    Exit,
    Empty,
    /// A known command used wrongly; carries the usage line.
    Usage(&'static str),
}

/// Classify a line. Lines that start with `/` but are not a known command
/// are sent to the model like any other message.
pub fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "exit" | "quit" if rest.is_empty() => Input::Exit,
        "/exit" | "/quit" => Input::Exit,
        "/tools" => Input::Tools,
        "/history" => Input::History,
        "/stats" => Input::Stats,
        "/clear" => Input::Clear,
        "/save" if rest.is_empty() => Input::Usage("/save <path>"),
        "/save" => Input::Save(rest),
        _ => Input::Message(line),
    }
}

pub async fn run(
    overrides: &Overrides,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(overrides).map_err(|e| format!("Failed to load config: {e}"))?;

    let gateway = localagent_providers::build_from_config(&config);
    let tools = Arc::new(localagent_tools::default_registry());
    let event_bus = Arc::new(EventBus::default());
    spawn_event_logger(&event_bus);

    let agent = TurnOrchestrator::from_config(&config, gateway, tools.clone(), event_bus);

    if let Some(msg) = message {
        // Single message mode
        let mut conv = Conversation::new();
        let outcome = agent.process(&mut conv, &msg).await;
        print!("{}", render_reply(&outcome.reply, &tools));
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        LocalAgent — Interactive Mode         ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:     {}", config.model);
    println!("  Endpoint:  {}", config.base_url);
    println!("  Tools:     {}", tools.names().join(", "));
    println!("  Context:   last {} turns", config.context_window);
    println!();
    println!("  Type your message and press Enter.");
    println!("  Commands: /tools /history /stats /clear /save <path> /exit");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut conv = Conversation::new();
    info!(conversation_id = %conv.id, "Chat session started");

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match classify(&line) {
            Input::Empty => {}
            Input::Exit => break,
            Input::Tools => print!("{}", super::tools::render(&tools)),
            Input::History => print!("{}", render_history(&conv, &tools)),
            Input::Stats => print!("{}", render_stats(&conv, &tools)),
            Input::Clear => {
                conv = Conversation::new();
                info!(conversation_id = %conv.id, "Conversation cleared");
                println!("  🗑️  Started a new conversation.\n");
            }
            Input::Save(path) => match conv.save_json(Path::new(path)) {
                Ok(()) => println!("  💾 Saved {} turns to {path}\n", conv.len()),
                Err(e) => eprintln!("  [Error] Could not save to {path}: {e}\n"),
            },
            Input::Usage(usage) => println!("  Usage: {usage}\n"),
            Input::Message(text) => {
                eprint!("  ...");
                let outcome = agent.process(&mut conv, text).await;
                eprint!("\r     \r");
                println!();
                print!("{}", render_reply(&outcome.reply, &tools));
                println!();
            }
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

fn spawn_event_logger(bus: &EventBus) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            debug!(?event, "Domain event");
        }
    });
}

/// The tool banner for a tool turn, e.g. `🌤️ Executed Tool: get_weather | Input: Paris`.
pub fn tool_banner(turn: &Turn, tools: &ToolRegistry) -> Option<String> {
    if !turn.tool_used {
        return None;
    }
    let name = turn.tool_name.as_deref().unwrap_or_default();
    let icon = tools.get(name).map(|t| t.icon()).unwrap_or("🔧");
    let input = turn.tool_input.as_deref().unwrap_or_default();
    Some(format!("{icon} Executed Tool: {name} | Input: {input}"))
}

/// An assistant turn as printed to the terminal.
pub fn render_reply(turn: &Turn, tools: &ToolRegistry) -> String {
    let mut out = String::new();
    if let Some(banner) = tool_banner(turn, tools) {
        out.push_str(&format!("  {banner}\n"));
    }
    for line in turn.content.lines() {
        out.push_str(&format!("  Assistant > {line}\n"));
    }
    out
}

/// The whole conversation, oldest first.
pub fn render_history(conv: &Conversation, tools: &ToolRegistry) -> String {
    if conv.is_empty() {
        return "  (no messages yet)\n\n".into();
    }
    let mut out = String::new();
    for turn in conv.turns() {
        match turn.role {
            Role::User => out.push_str(&format!("  You > {}\n", turn.content)),
            Role::Assistant => out.push_str(&render_reply(turn, tools)),
        }
    }
    out.push('\n');
    out
}

/// Message count and per-tool usage.
pub fn render_stats(conv: &Conversation, tools: &ToolRegistry) -> String {
    let mut out = format!("  📊 Messages: {}\n", conv.len());
    let usage = conv.tool_usage();
    if usage.is_empty() {
        out.push_str("  🛠️  No tools used yet\n");
    } else {
        out.push_str("  🛠️  Tool usage:\n");
        for (name, count) in usage {
            let icon = tools.get(&name).map(|t| t.icon()).unwrap_or("🔧");
            out.push_str(&format!("     {icon} {name}: {count}\n"));
        }
    }
    out.push('\n');
    out
}
