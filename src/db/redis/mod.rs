pub mod store;

pub use store::create_redis_client;
pub use store::RedisPreferenceStore;
pub use store::StoreKey;
