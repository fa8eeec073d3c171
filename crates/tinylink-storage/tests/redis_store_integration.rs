use redis::AsyncCommands;
use tinylink_core::{MappingStore, StoreError, Token};
use tinylink_storage::{RedisMappingStore, RedisStoreConfig, RetryPolicy, RetryingStore};
use tinylink_test_infra::redis::{RedisConfig, RedisServer};

/// Test fixture that keeps the Redis container alive for the test's duration.
struct Fixture {
    redis: RedisServer,
    store: RedisMappingStore,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::new(RedisConfig::default())
            .await
            .expect("start redis");
        let conn = redis.connection().await.expect("redis connection");
        Self {
            store: RedisMappingStore::new(conn),
            redis,
        }
    }
}

fn token(s: &str) -> Token {
    Token::parse(s).unwrap()
}

#[tokio::test]
async fn store_then_lookup_round_trips() {
    let fixture = Fixture::start().await;
    let t = token("NkHF8i");

    fixture
        .store
        .store(&t, "https://example.com/page")
        .await
        .unwrap();

    let result = fixture.store.lookup(&t).await.unwrap();
    assert_eq!(result.as_deref(), Some("https://example.com/page"));
}

#[tokio::test]
async fn lookup_unknown_token_is_none() {
    let fixture = Fixture::start().await;

    let result = fixture.store.lookup(&token("never0")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn mappings_live_in_the_long_url_hash() {
    let fixture = Fixture::start().await;
    let t = token("abc123");

    fixture
        .store
        .store(&t, "https://example.com")
        .await
        .unwrap();

    let mut conn = fixture.redis.connection().await.unwrap();
    let raw: Option<String> = conn.hget("longURL", "abc123").await.unwrap();
    assert_eq!(raw.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn repeated_store_is_idempotent_and_last_write_wins() {
    let fixture = Fixture::start().await;
    let t = token("abc123");

    fixture.store.store(&t, "https://a.com").await.unwrap();
    fixture.store.store(&t, "https://a.com").await.unwrap();
    assert_eq!(
        fixture.store.lookup(&t).await.unwrap().as_deref(),
        Some("https://a.com")
    );

    fixture.store.store(&t, "https://b.com").await.unwrap();
    assert_eq!(
        fixture.store.lookup(&t).await.unwrap().as_deref(),
        Some("https://b.com")
    );
}

#[tokio::test]
async fn custom_namespace_is_isolated() {
    let fixture = Fixture::start().await;
    let conn = fixture.redis.connection().await.unwrap();
    let other = RedisMappingStore::with_namespace(conn, "links");
    let t = token("abc123");

    other.store(&t, "https://example.com").await.unwrap();

    assert!(fixture.store.lookup(&t).await.unwrap().is_none());
    assert_eq!(
        other.lookup(&t).await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn connect_with_password() {
    let redis = RedisServer::new(RedisConfig::builder().password("s3cr@t").build())
        .await
        .expect("start redis");
    let address = redis.address().await.unwrap();

    let config = RedisStoreConfig::builder()
        .address(address)
        .password(Some("s3cr@t".into()))
        .build();
    let store = RedisMappingStore::connect(&config).await.unwrap();

    let t = token("abc123");
    store.store(&t, "https://example.com").await.unwrap();
    assert_eq!(
        store.lookup(&t).await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[tokio::test]
async fn wrong_type_is_a_permanent_store_error() {
    let fixture = Fixture::start().await;
    let mut conn = fixture.redis.connection().await.unwrap();
    let _: () = conn.set("longURL", "not-a-hash").await.unwrap();

    let store = RetryingStore::new(fixture.store.clone(), RetryPolicy::with_retries(3));
    let err = store.lookup(&token("abc123")).await.unwrap_err();
    assert!(matches!(err, StoreError::Operation(_)), "{err:?}");
}
