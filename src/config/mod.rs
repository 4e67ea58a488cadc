//! Configuration module

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// When unset the in-memory store is used
    pub mongodb_url: Option<String>,
    #[serde(default = "default_database_name")]
    pub database_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            mongodb_url: None,
            database_name: default_database_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Upper bound for a single capture insert before it is abandoned
    #[serde(default = "default_capture_timeout_ms")]
    pub capture_timeout_ms: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            capture_timeout_ms: default_capture_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_name() -> String {
    "audit_logs".to_string()
}

fn default_capture_timeout_ms() -> u64 {
    2000
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("AUDIT_RECORDER").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;

        Ok(config)
    }

    pub fn bind_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;
        Ok(addr)
    }
}
