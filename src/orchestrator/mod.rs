//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::batch_generator (并发处理多个段落类型)
//!     ↓
//! workflow (草稿、编译流程)
//!     ↓
//! services (能力层：生成 / 认证)
//!     ↓
//! infrastructure (基础设施：ApiClient / KeyValueStore)
//! ```

pub mod batch_generator;

// 重新导出主要类型
pub use batch_generator::{
    generate_all, generate_single, run_batch, save_all, settle_all, BatchOutcome, BatchReport,
    SaveReport, PARTIAL_FAILURE_WARNING,
};
