//! 对象缓存层
//!
//! 通过插件注册表选择后端：moka（进程内）或 redis。
//! JWT 中间件用它按 token 缓存已认证用户。

pub mod moka;
pub mod redis;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明并在进程启动时注册一个缓存后端插件
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(
                        || -> $crate::cache::register::BoxedObjectCacheFuture {
                            Box::pin(async {
                                let cache = <$ty>::new()
                                    .map_err($crate::errors::BootcampError::cache_connection)?;
                                Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                            })
                        },
                    ),
                );
            }
        }
    };
}
