use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Command-line flags accepted by the `forge` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "forge", about = "Minimal HTTP/1.1 server over raw sockets")]
pub struct Cli {
    /// Root directory served under `/files/`
    #[arg(long)]
    pub directory: Option<String>,

    /// Address to listen on (overrides config file and LISTEN)
    #[arg(long)]
    pub listen: Option<String>,

    /// Optional YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Upper bound on concurrently served connections. Unbounded when absent.
    #[serde(default)]
    pub max_connections: Option<usize>,

    /// Deadline for receiving the complete header block.
    #[serde(default)]
    pub header_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Root for `/files/*`; the remainder of the route is appended verbatim.
    #[serde(default)]
    pub directory: Option<String>,

    #[serde(default = "default_true")]
    pub reject_traversal: bool,
}

fn default_listen_addr() -> String {
    std::env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_connections: None,
            header_timeout_secs: None,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            directory: None,
            reject_traversal: true,
        }
    }
}

impl Config {
    /// Defaults, with `LISTEN` taken from the environment when set.
    pub fn load() -> Self {
        Self {
            server: ServerConfig::default(),
            files: FilesConfig::default(),
        }
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(text).context("Invalid configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Builds the final configuration: file (or defaults), then flags on top.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::load(),
        };

        if let Some(dir) = &cli.directory {
            cfg.files.directory = Some(dir.clone());
        }
        if let Some(addr) = &cli.listen {
            cfg.server.listen_addr = addr.clone();
        }

        cfg.files.normalize();
        Ok(cfg)
    }

    /// Startup checks. A missing file root is fatal for the whole process.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.files.directory {
            let meta = std::fs::metadata(dir)
                .with_context(|| format!("Directory does not exist: {}", dir))?;
            if !meta.is_dir() {
                anyhow::bail!("Not a directory: {}", dir);
            }
        }

        if self.server.max_connections == Some(0) {
            anyhow::bail!("max_connections must be greater than zero");
        }

        Ok(())
    }
}

impl FilesConfig {
    /// Ensures the root ends with `/` so concatenation stays inside it.
    pub fn normalize(&mut self) {
        if let Some(dir) = &mut self.directory {
            if !dir.ends_with('/') {
                dir.push('/');
            }
        }
    }
}
