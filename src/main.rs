use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;

use chat_gateway::config::GatewayConfig;
use chat_gateway::dispatch::{AgentEntry, AgentRegistry};
use chat_gateway::gateway::ChatGateway;
use chat_gateway::logging;
use chat_gateway::runtime::{EchoAgent, InMemorySessionService};
use chat_gateway::transport::history;

fn main() -> anyhow::Result<()> {
    // Initialize logging system
    let _guard = logging::init_logging()?;

    tracing::info!("=== Chat Gateway Starting ===");

    let config = GatewayConfig::new("chat-gateway", "visitor").with_default_agent("triage");

    // Fixed agent set; a real deployment plugs LLM-backed behaviors in here
    let mut registry = AgentRegistry::new();
    registry.register(AgentEntry::new(
        "triage",
        "Triage",
        "First-line intake",
        Arc::new(EchoAgent::new("triage")),
    ));
    registry.register(AgentEntry::new(
        "scheduling",
        "Scheduling",
        "Appointment handling",
        Arc::new(EchoAgent::new("scheduling")),
    ));

    tracing::info!("Registered {} agents", registry.len());

    let sessions = Arc::new(InMemorySessionService::new());
    let gateway = ChatGateway::new(config, registry, sessions);

    println!("Chat gateway console. Type a message, or 'exit' to quit.");

    // This console plays the transport's role: it holds the raw history
    // (session marker included) across turns, the way the chat widget
    // holds it across page round-trips.
    let mut held_history: Option<Vec<serde_json::Value>> = None;

    let stdin = io::stdin();
    print_prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let message = line.trim();

        if message == "exit" {
            break;
        }
        if message.is_empty() {
            print_prompt()?;
            continue;
        }

        let outcome = gateway.handle_turn(message, held_history.as_deref(), None);
        println!("{} {}", "agent:".green().bold(), outcome.reply);

        let mut next = outcome.history;
        next.push(history::turn(message, outcome.reply));
        held_history = Some(next);

        print_prompt()?;
    }

    tracing::info!("=== Chat Gateway Shutting Down ===");

    Ok(())
}

fn print_prompt() -> io::Result<()> {
    print!("{} ", "you:".cyan().bold());
    io::stdout().flush()
}
