use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_DIRECTORY: &str = "/tmp";

/// Server settings, resolved once before the listener starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the listener binds, `host:port`
    pub listen_addr: String,
    /// Base directory for the `/files` endpoint
    pub directory: PathBuf,
    /// Deadline for reading one request; unset means wait forever
    pub read_timeout_secs: Option<u64>,
    /// Cap on connections handled at once; unset means unbounded
    pub max_connections: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            read_timeout_secs: None,
            max_connections: None,
        }
    }
}

/// Command line flags.
#[derive(Debug, Parser)]
#[command(name = "outpost", about = "A small HTTP/1.1 server", long_about = None)]
pub struct Cli {
    /// YAML file with server settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory served and written by /files
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seconds to wait for a complete request
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// Maximum number of connections handled concurrently
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl Config {
    /// Builds the configuration from defaults, the optional YAML file and
    /// then the command line flags, in increasing precedence.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let cfg = base.with_overrides(cli);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects settings the listener cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_connections == Some(0) {
            anyhow::bail!("max_connections must be at least 1");
        }
        if self.read_timeout_secs == Some(0) {
            anyhow::bail!("read_timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(directory) = &cli.directory {
            self.directory = directory.clone();
        }
        if cli.host.is_some() || cli.port.is_some() {
            let (host, port) = split_host_port(&self.listen_addr);
            let host = cli.host.as_deref().unwrap_or(host);
            let port = cli.port.map(|p| p.to_string()).unwrap_or_else(|| port.to_string());
            self.listen_addr = format!("{}:{}", host, port);
        }
        if cli.read_timeout.is_some() {
            self.read_timeout_secs = cli.read_timeout;
        }
        if cli.max_connections.is_some() {
            self.max_connections = cli.max_connections;
        }
        self
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }
}

// "[::]:4221" keeps its brackets on the host side.
fn split_host_port(addr: &str) -> (&str, &str) {
    match addr.rsplit_once(':') {
        Some((host, port)) => (host, port),
        None => (addr, "4221"),
    }
}
