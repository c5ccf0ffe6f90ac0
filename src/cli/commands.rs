//! CLI command implementations
//!
//! Boot sequence for `start`: load and validate configuration, open the
//! durable store (journal replay), build the HTTP server, serve until the
//! process is terminated. `init` only touches the filesystem.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{Logger, Severity};
use crate::store::DurableBagStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Service configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the bag journal
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// HTTP server section
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_data_dir() -> String {
    "./bagtrack-data".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::Config("data_dir must not be empty".to_string()));
        }
        if self.http.port == 0 {
            return Err(CliError::Config("http.port must be nonzero".to_string()));
        }
        Ok(())
    }

    /// Data directory path; a relative `data_dir` resolves against the
    /// directory holding the config file.
    pub fn data_path(&self, config_path: &Path) -> std::path::PathBuf {
        let data_dir = Path::new(&self.data_dir);
        if data_dir.is_absolute() {
            data_dir.to_path_buf()
        } else {
            config_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(data_dir)
        }
    }
}

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Dispatch a parsed command
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default configuration file and create the data directory.
///
/// Refuses to overwrite an existing configuration.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(format!(
            "config already exists at {}",
            config_path.display()
        )));
    }

    let config = Config::default();
    let body = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::Io(format!("failed to encode config: {}", e)))?;
    fs::write(config_path, body)
        .map_err(|e| CliError::Io(format!("failed to write config: {}", e)))?;
    let data_path = config.data_path(config_path);
    fs::create_dir_all(&data_path)
        .map_err(|e| CliError::Io(format!("failed to create data directory: {}", e)))?;

    Logger::log(
        Severity::Info,
        "initialized",
        &[
            ("config", &config_path.display().to_string()),
            ("data_dir", &config.data_dir),
        ],
    );
    Ok(())
}

/// Boot the store and serve HTTP until terminated.
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let store = DurableBagStore::open(&config.data_path(config_path))
        .map_err(|e| CliError::Boot(e.to_string()))?;
    Logger::log(
        Severity::Info,
        "journal_replayed",
        &[
            ("bags", &store.len().to_string()),
            ("data_dir", &config.data_dir),
        ],
    );

    let server = HttpServer::with_config(Arc::new(store), config.http);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("failed to start runtime: {}", e)))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::Boot(e.to_string()))
}
