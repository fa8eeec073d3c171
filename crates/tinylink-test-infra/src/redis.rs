use crate::Result;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use typed_builder::TypedBuilder;

const REDIS_PORT: u16 = 6379;

/// Settings for a disposable Redis server.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    #[builder(default = "8.6.0".to_string(), setter(into))]
    pub tag: String,
    /// When set, the server is started with `--requirepass`.
    #[builder(default, setter(strip_option, into))]
    pub password: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Test fixture for a single Redis server container.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
    config: RedisConfig,
}

impl RedisServer {
    /// Starts a Redis container on a random host port.
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let mut cmd = vec!["redis-server".to_string()];
        if let Some(password) = &config.password {
            cmd.push("--requirepass".to_string());
            cmd.push(password.clone());
        }

        let container = GenericImage::new("redis", config.tag.as_str())
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .with_cmd(cmd)
            .start()
            .await?;

        Ok(Self { container, config })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();
        Ok(match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        })
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT).await?)
    }

    /// Bare `host:port` address of the server.
    pub async fn address(&self) -> Result<String> {
        Ok(format!("{}:{}", self.host().await?, self.port().await?))
    }

    /// The password the server was started with, if any.
    pub fn password(&self) -> Option<&str> {
        self.config.password.as_deref()
    }

    /// Opens a multiplexed connection, retrying while the server warms up.
    pub async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        let address = self.address().await?;
        let url = match self.password() {
            Some(password) => format!(
                "redis://:{}@{}/0",
                urlencoding::encode(password),
                address
            ),
            None => format!("redis://{}/0", address),
        };
        let client = redis::Client::open(url)?;

        let mut last_error = None;
        for _ in 0..20 {
            match client.get_multiplexed_async_connection().await {
                Ok(conn) => return Ok(conn),
                Err(err) => {
                    last_error = Some(err);
                    tokio::time::sleep(Duration::from_millis(250)).await;
                }
            }
        }
        match last_error {
            Some(err) => Err(err.into()),
            None => Ok(client.get_multiplexed_async_connection().await?),
        }
    }
}
