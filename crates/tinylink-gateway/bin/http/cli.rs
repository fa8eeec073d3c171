use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "TINYLINK_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "REDIS_URL";
pub const REDIS_PASSWORD_ENV: &str = "REDIS_PASSWORD";
pub const REDIS_NAMESPACE_ENV: &str = "TINYLINK_REDIS_NAMESPACE";
pub const STORE_RETRIES_ENV: &str = "TINYLINK_STORE_RETRIES";
pub const LOG_FORMAT_ENV: &str = "TINYLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REDIS_URL: &str = "127.0.0.1:6379";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "Deterministic URL shortener backed by Redis")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Prefix for returned short links, e.g. `https://tiny.link`.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Redis
    )]
    pub storage: StorageBackendArg,

    /// Redis address: bare `host:port` or a full `redis://` URL.
    #[arg(long, env = REDIS_URL_ENV, default_value = DEFAULT_REDIS_URL)]
    pub redis_url: String,

    #[arg(long, env = REDIS_PASSWORD_ENV, hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Name of the Redis hash holding the mappings.
    #[arg(long, env = REDIS_NAMESPACE_ENV, default_value = tinylink_storage::DEFAULT_NAMESPACE)]
    pub redis_namespace: String,

    /// Retries for transient store failures; 0 disables retrying.
    #[arg(long, env = STORE_RETRIES_ENV, default_value_t = 0)]
    pub store_retries: u32,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}
