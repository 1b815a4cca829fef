use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    ttl: u64, // TTL in seconds
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        debug!(
            "RedisObjectCache created with prefix: '{}', TTL: {}s",
            redis_config.key_prefix, config.cache.default_ttl
        );

        let client = redis::Client::open(redis_config.url.clone())
            .map_err(|e| format!("Failed to create Redis client: {e}"))?;

        // 测试 Redis 连接
        match client.get_connection() {
            Ok(mut conn) => {
                if let Err(e) = redis::cmd("PING").query::<String>(&mut conn) {
                    error!(
                        "Failed to ping Redis server: {}. Check Redis server status and URL: {}",
                        e, redis_config.url
                    );
                    return Err(format!("Redis ping failed: {e}"));
                }
            }
            Err(e) => {
                error!(
                    "Failed to connect to Redis server: {}. Check Redis server status and URL: {}",
                    e, redis_config.url
                );
                return Err(format!("Redis connection failed: {e}"));
            }
        }

        Ok(Self {
            client,
            key_prefix: redis_config.key_prefix.clone(),
            ttl: config.cache.default_ttl,
        })
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection, redis::RedisError> {
        self.client.get_multiplexed_async_connection().await
    }

    fn make_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return CacheResult::NotFound;
            }
        };

        match conn.get::<_, Option<String>>(&redis_key).await {
            Ok(Some(value)) => CacheResult::Found(value),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET failed for key {}: {}", redis_key, e);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let redis_key = self.make_key(&key);
        let effective_ttl = if ttl == 0 { self.ttl } else { ttl };

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(&redis_key, value, effective_ttl)
            .await
        {
            error!("Redis SETEX failed for key {}: {}", redis_key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let redis_key = self.make_key(key);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        if let Err(e) = conn.del::<_, ()>(&redis_key).await {
            error!("Redis DEL failed for key {}: {}", redis_key, e);
        }
    }

    async fn invalidate_all(&self) {
        let pattern = format!("{}*", self.key_prefix);

        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return;
            }
        };

        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                error!("Redis KEYS failed for pattern {}: {}", pattern, e);
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        if let Err(e) = conn.del::<_, ()>(keys).await {
            error!("Redis bulk DEL failed: {}", e);
        }
    }
}
