use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .time_to_live(std::time::Duration::from_secs(config.cache.default_ttl))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.cache.memory.max_capacity
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            CacheResult::Found(value)
        } else {
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // Moka 在创建时设置了全局 TTL 策略，这里的 ttl 参数被忽略
        self.inner.insert(key, value).await;

        if ttl != 0 {
            tracing::debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
