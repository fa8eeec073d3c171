use thiserror::Error;

/// Failures while starting a disposable server or connecting to it.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("failed to run test container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("test redis server unreachable: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T, E = TestInfraError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redis_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: TestInfraError = redis::RedisError::from(io).into();

        assert!(matches!(err, TestInfraError::Redis(_)));
        assert!(err.to_string().starts_with("test redis server unreachable"));
    }
}
