//! Consilium CLI: serve the expert panel over MCP, or query it directly.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use consilium_core::config::{LoggingConfig, default_log_dir, load_config};

/// Consilium: rule-based expert panel and plan synthesizer
#[derive(Parser, Debug)]
#[command(name = "consilium", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path (replaces the workspace config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the MCP server over stdio
    Serve,
    /// Select the experts for a query
    Analyze {
        /// The problem or question
        query: String,
    },
    /// Consult a single expert
    Consult {
        /// Expert tool name or short name (e.g. consult_security_expert, security, qa)
        expert: consilium_core::ExpertDomain,
        /// The problem or question
        query: String,
        /// Additional context
        #[arg(long)]
        context: Option<String>,
        /// Domain hint as field=value (e.g. metrics="p95 4s"); repeatable
        #[arg(long = "hint", value_name = "FIELD=VALUE")]
        hints: Vec<String>,
    },
    /// Suggest code locations for a query
    Locate {
        /// The problem or question
        query: String,
        /// Extra search terms; repeatable
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
        /// Only suggest files with these extensions; repeatable
        #[arg(short, long = "ext")]
        extensions: Vec<String>,
        /// Force a search strategy
        #[arg(short, long, value_enum)]
        search_type: Option<SearchTypeArg>,
    },
    /// Merge expert responses into one plan
    Synthesize {
        /// The original query
        query: String,
        /// Expert responses as JSON text; read from --file or stdin when omitted
        responses: Option<String>,
        /// Read expert responses from a file
        #[arg(short, long, conflicts_with = "responses")]
        file: Option<PathBuf>,
        /// Attach code location hints
        #[arg(long)]
        code_locations: bool,
    },
    /// List the experts and their categories
    Experts,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SearchTypeArg {
    Database,
    Api,
    Frontend,
    General,
}

impl From<SearchTypeArg> for consilium_core::SearchType {
    fn from(arg: SearchTypeArg) -> Self {
        match arg {
            SearchTypeArg::Database => Self::Database,
            SearchTypeArg::Api => Self::Api,
            SearchTypeArg::Frontend => Self::Frontend,
            SearchTypeArg::General => Self::General,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default workspace configuration file
    Init,
    /// Show the effective configuration
    Show,
}

/// Install the global subscriber: human-readable stderr, plus JSON files when enabled.
///
/// stdout carries MCP traffic, so nothing may log there. The returned guard
/// flushes the file writer on drop and must live until exit.
fn init_tracing(cli: &Cli, logging: &LoggingConfig) -> Option<WorkerGuard> {
    let level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let stderr_filter = if cli.verbose > 0 || cli.quiet {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let mut guard = None;
    let json_layer = if logging.json_file {
        let log_dir = logging
            .directory
            .clone()
            .or_else(default_log_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "consilium.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug")),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| cli.workspace.clone());

    let config = load_config(Some(&workspace), cli.config.as_deref(), None)?;

    let _guard = init_tracing(&cli, &config.logging);

    let command = cli.command.unwrap_or(Commands::Serve);
    commands::handle_command(command, &config, &workspace).await
}
