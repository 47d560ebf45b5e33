use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod manifest;

use commands::{build_registry, call_tool, list_tools, render_manifest};

#[derive(Parser, Debug)]
#[command(name = "policy-agent", version = "0.1.0")]
#[command(about = "Policy Agent CLI - inspect and invoke agent tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or invoke registered tools
    Tools {
        #[command(subcommand)]
        tools_command: ToolsCommands,
    },
    /// Print the agent manifest as JSON
    Manifest {
        /// Prompt template file (overrides POLICY_AGENT_PROMPTS_PATH)
        #[arg(long)]
        prompts: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ToolsCommands {
    /// List registered tools
    List {
        /// Emit descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Invoke a tool and print its answer
    Call {
        /// Tool name
        name: String,
        /// Argument as key=value (repeatable)
        #[arg(long = "arg")]
        args: Vec<String>,
    },
}

/// `RUST_LOG` when it is set and parses; `info` otherwise.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() {
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    let env_filter = log_filter(std::env::var("RUST_LOG").ok());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();

    let cli = Cli::parse();

    let registry = build_registry();

    let output = match cli.command {
        Commands::Tools { tools_command } => match tools_command {
            ToolsCommands::List { json } => list_tools(&registry, json),
            ToolsCommands::Call { name, args } => call_tool(&registry, &name, &args),
        },
        Commands::Manifest { prompts } => render_manifest(&registry, prompts),
    };

    match output {
        Ok(text) => println!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            std::process::exit(1);
        }
    }
}
