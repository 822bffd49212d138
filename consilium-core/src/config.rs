//! Configuration system for Consilium.
//!
//! Uses `figment` for layered configuration: defaults -> user config -> workspace
//! config -> environment -> explicit overrides. Files are read from the user
//! config directory (`directories` project dirs) and `.consilium/config.toml`
//! in the workspace directory, or from a single explicit file.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;
use crate::error::ConsiliumError;

/// Name of the per-workspace configuration directory.
pub const WORKSPACE_DIR: &str = ".consilium";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "CONSILIUM_";

/// Top-level configuration for Consilium.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsiliumConfig {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub synthesis: SynthesisConfig,
}

/// Log output settings. Console output always goes to stderr.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when no `-v`/`-q` flag or `RUST_LOG` is given.
    pub level: String,
    /// Also write JSON logs to a daily rolling file.
    pub json_file: bool,
    /// Directory for JSON log files; the user data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_file: false,
            directory: None,
        }
    }
}

/// MCP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name reported in the `initialize` result.
    pub name: String,
    /// Upper bound on a single tool execution.
    pub tool_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "consilium".to_string(),
            tool_timeout_secs: 10,
        }
    }
}

/// Synthesis defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Attach code locations when the caller omits `includeCodeLocation`.
    pub include_code_location: bool,
}

fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "consilium", "consilium")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(WORKSPACE_DIR).join(CONFIG_FILE)
}

/// Default directory for JSON log files.
pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "consilium", "consilium")
        .map(|dirs| dirs.data_dir().join("logs"))
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `CONSILIUM_`)
/// 3. `config_file` if given, otherwise the workspace config (`.consilium/config.toml`)
/// 4. User config (`~/.config/consilium/config.toml` or platform equivalent)
/// 5. Built-in defaults
///
/// An explicit `config_file` that does not exist is an error; the implicit
/// locations are skipped when absent.
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&ConsiliumConfig>,
) -> Result<ConsiliumConfig> {
    let mut figment = Figment::from(Serialized::defaults(ConsiliumConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(ConsiliumError::ConfigFileNotFound {
                    path: path.to_path_buf(),
                });
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(ws) = workspace {
                let ws_config = workspace_config_path(ws);
                if ws_config.exists() {
                    figment = figment.merge(Toml::file(&ws_config));
                }
            }
        }
    }

    // CONSILIUM_LOGGING__LEVEL, CONSILIUM_SERVER__TOOL_TIMEOUT_SECS, etc.
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment
        .extract()
        .map_err(|e| ConsiliumError::Config(Box::new(e)))
}

/// Check whether any Consilium configuration file exists (user-level or workspace-level).
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if user_config_path().is_some_and(|p| p.exists()) {
        return true;
    }
    workspace.is_some_and(|ws| workspace_config_path(ws).exists())
}
