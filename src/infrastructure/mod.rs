//! 基础设施层
//!
//! 持有稀缺资源（HTTP 连接池、持久化文件），只暴露能力。

pub mod http_client;
pub mod storage;

pub use http_client::{extract_error_message, ApiClient, RequestBody};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
