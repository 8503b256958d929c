use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Environment variable pointing at a YAML configuration file.
pub const CONFIG_ENV: &str = "WAYPOINT_CONFIG";

const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 30;

/// Server configuration, fixed at construction time.
///
/// The dispatcher and the serving loop read this but never mutate it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Emit a per-request debug line when set.
    pub debug: bool,
    /// API version, applied as a `/v{version}` prefix to every route.
    pub version: u32,
    /// TLS key/certificate pair; plain TCP when absent.
    pub tls: Option<TlsConfig>,
    /// Token authentication; disabled when absent.
    pub auth: Option<AuthConfig>,
    /// Upper bound on handler execution time, in seconds.
    pub handler_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub key_path: PathBuf,
    pub cert_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3000,
            debug: false,
            version: 0,
            tls: None,
            auth: None,
            handler_timeout_secs: DEFAULT_HANDLER_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from the file named by `WAYPOINT_CONFIG`,
    /// falling back to defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// The `host:port` pair to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
