mod store;
mod memory_store;
mod redis_service;
pub mod insights;

pub use store::{Store, UserStore, RecordStore};
pub use memory_store::MemoryStore;
pub use redis_service::RedisStore;
pub use insights::InsightsService;
