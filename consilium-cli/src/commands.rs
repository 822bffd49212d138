//! CLI subcommand handlers.

use anyhow::Context;
use consilium_core::{
    ConsiliumConfig, ConsultRequest, Dispatcher, ExpertDomain, LocateRequest,
    config::{WORKSPACE_DIR, config_exists},
};
use consilium_mcp::McpServer;
use consilium_mcp::transport::StdioTransport;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{Commands, ConfigAction};

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    config: &ConsiliumConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve => serve(config).await,
        Commands::Analyze { query } => print_json(&Dispatcher::new().analyze_task(&query)),
        Commands::Consult {
            expert,
            query,
            context,
            hints,
        } => {
            let request = consult_request(query, context, &hints)?;
            print_json(&Dispatcher::new().consult(expert, &request))
        }
        Commands::Locate {
            query,
            keywords,
            extensions,
            search_type,
        } => {
            let request = LocateRequest {
                user_query: query,
                keywords,
                file_extensions: extensions,
                search_type: search_type.map(Into::into),
            };
            print_json(&Dispatcher::new().locate(&request))
        }
        Commands::Synthesize {
            query,
            responses,
            file,
            code_locations,
        } => {
            let raw = read_responses(responses, file)?;
            let include = code_locations || config.synthesis.include_code_location;
            print_json(&Dispatcher::new().synthesize(&raw, &query, include))
        }
        Commands::Experts => {
            list_experts();
            Ok(())
        }
        Commands::Config { action } => handle_config(action, config, workspace),
    }
}

async fn serve(config: &ConsiliumConfig) -> anyhow::Result<()> {
    let mut server = McpServer::with_config(config)?;
    let mut transport = StdioTransport::stdio();
    info!(name = %config.server.name, "Serving MCP over stdio");

    tokio::select! {
        result = server.run(&mut transport) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build a consult request from `--context` and `--hint field=value` pairs.
fn consult_request(
    query: String,
    context: Option<String>,
    hints: &[String],
) -> anyhow::Result<ConsultRequest> {
    let mut request = ConsultRequest::new(query);
    if let Some(context) = context {
        request = request.with_context(context);
    }
    for hint in hints {
        let (field, value) = hint
            .split_once('=')
            .with_context(|| format!("hint '{hint}' is not in FIELD=VALUE form"))?;
        request = request.with_hint(field.trim(), Value::String(value.trim().to_string()));
    }
    Ok(request)
}

fn read_responses(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read expert responses from stdin")?;
            Ok(buf)
        }
    }
}

fn list_experts() {
    let dispatcher = Dispatcher::new();
    for expert in dispatcher.panel().iter() {
        let domain: ExpertDomain = expert.domain();
        let profile = domain.profile();
        println!("{} ({})", domain.tool_name(), profile.title);
        println!("  {}", profile.description);
        println!("  categories: {}", expert.categories().join(", "));
        println!("  hint field: {}", profile.questions.hint_field);
    }
}

fn handle_config(
    action: ConfigAction,
    config: &ConsiliumConfig,
    workspace: &Path,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_dir = workspace.join(WORKSPACE_DIR);
            std::fs::create_dir_all(&config_dir)?;

            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            let toml_str = toml::to_string_pretty(&ConsiliumConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            if !config_exists(Some(workspace)) {
                println!("# No configuration file found; showing built-in defaults");
            }
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}
