use async_trait::async_trait;
use redis::AsyncCommands;
use tinylink_core::store::Result;
use tinylink_core::{MappingStore, StoreError, Token};
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

/// Name of the Redis hash holding token to long URL mappings.
pub const DEFAULT_NAMESPACE: &str = "longURL";

/// Connection settings for [`RedisMappingStore`].
///
/// `address` is either a bare `host:port` or a full `redis://` / `rediss://`
/// / `unix://` URL. `password` only applies to bare addresses; a full URL
/// carries its own credentials.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisStoreConfig {
    #[builder(setter(into))]
    pub address: String,
    #[builder(default)]
    pub password: Option<String>,
    #[builder(default = DEFAULT_NAMESPACE.to_string(), setter(into))]
    pub namespace: String,
}

impl RedisStoreConfig {
    /// Builds the connection URL handed to the Redis client. Database 0.
    pub fn connection_url(&self) -> String {
        let address = self.address.trim();
        if ["redis://", "rediss://", "unix://", "redis+unix://"]
            .iter()
            .any(|scheme| address.starts_with(scheme))
        {
            return address.to_string();
        }

        match self.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => format!(
                "redis://:{}@{}/0",
                urlencoding::encode(password),
                address
            ),
            None => format!("redis://{}/0", address),
        }
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

/// A Redis-backed implementation of [`MappingStore`].
///
/// All mappings live as fields of one hash (`longURL` by default):
/// `HSET <namespace> <token> <long_url>` to store, `HGET` to look up.
/// The multiplexed connection is opened once and cloned per call.
#[derive(Debug, Clone)]
pub struct RedisMappingStore {
    conn: redis::aio::MultiplexedConnection,
    namespace: String,
}

impl RedisMappingStore {
    /// Creates a store over an existing connection using the default namespace.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_namespace(conn, DEFAULT_NAMESPACE)
    }

    /// Creates a store over an existing connection using a custom hash name.
    pub fn with_namespace(
        conn: redis::aio::MultiplexedConnection,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            namespace: namespace.into(),
        }
    }

    /// Opens a connection described by `config`.
    pub async fn connect(config: &RedisStoreConfig) -> Result<Self> {
        let client = redis::Client::open(config.connection_url())
            .map_err(|e| map_redis_error("invalid redis address", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;

        info!(namespace = %config.namespace, "connected to redis");
        Ok(Self::with_namespace(conn, config.namespace.clone()))
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn store(&self, token: &Token, long_url: &str) -> Result<()> {
        trace!(token = %token, namespace = %self.namespace, "HSET mapping");

        let mut conn = self.conn.clone();
        match conn
            .hset::<_, _, _, ()>(self.namespace.as_str(), token.as_str(), long_url)
            .await
        {
            Ok(()) => {
                debug!(token = %token, "stored mapping in redis");
                Ok(())
            }
            Err(e) => {
                warn!(token = %token, error = %e, "redis error on HSET");
                Err(map_redis_error("failed to write mapping to redis", e))
            }
        }
    }

    async fn lookup(&self, token: &Token) -> Result<Option<String>> {
        trace!(token = %token, namespace = %self.namespace, "HGET mapping");

        let mut conn = self.conn.clone();
        match conn
            .hget::<_, _, Option<String>>(self.namespace.as_str(), token.as_str())
            .await
        {
            Ok(Some(long_url)) => {
                debug!(token = %token, "mapping found in redis");
                Ok(Some(long_url))
            }
            Ok(None) => {
                trace!(token = %token, "mapping not found in redis");
                Ok(None)
            }
            Err(e) => {
                warn!(token = %token, error = %e, "redis error on HGET");
                Err(map_redis_error("failed to read mapping from redis", e))
            }
        }
    }
}
