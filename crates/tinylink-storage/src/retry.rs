use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tinylink_core::store::Result;
use tinylink_core::{MappingStore, Token};
use tracing::warn;
use typed_builder::TypedBuilder;

/// Bounded retry schedule for transient store failures.
///
/// The delay before retry `n` (1-based) is `base_delay * 2^(n-1)`, capped at
/// `max_delay`, then jittered uniformly into its upper half.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RetryPolicy {
    /// Total attempts per operation, including the first one.
    #[builder(default = 1)]
    pub max_attempts: u32,
    #[builder(default = Duration::from_millis(50))]
    pub base_delay: Duration,
    #[builder(default = Duration::from_secs(1))]
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// A policy allowing `retries` retries after the first attempt.
    pub fn with_retries(retries: u32) -> Self {
        Self::builder().max_attempts(retries.saturating_add(1)).build()
    }

    fn backoff(&self, retry: u32) -> Duration {
        let exp = 2u32.saturating_pow(retry.saturating_sub(1));
        let delay = self.base_delay.saturating_mul(exp).min(self.max_delay);
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        if millis < 2 {
            return delay;
        }
        let jittered = rand::thread_rng().gen_range(millis / 2..=millis);
        Duration::from_millis(jittered)
    }
}

/// A [`MappingStore`] decorator that retries transient failures.
///
/// Only errors reported by [`StoreError::is_transient`][tinylink_core::StoreError::is_transient] are retried.
/// Both operations are idempotent, so replaying a write whose
/// acknowledgement was lost is harmless.
#[derive(Debug, Clone)]
pub struct RetryingStore<S> {
    inner: S,
    policy: RetryPolicy,
}

impl<S: MappingStore> RetryingStore<S> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns a reference to the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn run<T, F, Fut>(&self, operation: &'static str, token: &Token, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match f().await {
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    warn!(
                        token = %token,
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient store error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

#[async_trait]
impl<S: MappingStore> MappingStore for RetryingStore<S> {
    async fn store(&self, token: &Token, long_url: &str) -> Result<()> {
        self.run("store", token, move || self.inner.store(token, long_url))
            .await
    }

    async fn lookup(&self, token: &Token) -> Result<Option<String>> {
        self.run("lookup", token, move || self.inner.lookup(token))
            .await
    }
}
