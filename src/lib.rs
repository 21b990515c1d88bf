//! # CV Builder Client
//!
//! 简历生成工具的客户端：维护个人资料、经历、项目和职位描述，
//! 通过后端生成段落（blurb），并调用远程编译服务生成 PDF。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源，只暴露能力
//! - `ApiClient` - 唯一的 HTTP 连接持有者，负责认证头和错误归一化
//! - `KeyValueStore` - 持久化存储（令牌、主题偏好）
//!
//! ### ② 状态层（State）
//! - `state/` - 两个显式注入的状态容器
//! - `SessionState` - 会话令牌
//! - `ThemeState` - 主题偏好
//!
//! ### ③ 业务能力层（Services / API）
//! - `api/` - 每个后端资源的无状态请求函数
//! - `services/` - `AuthService`、`BlurbGenerator`
//!
//! ### ④ 流程层（Workflow）
//! - `BlurbDrafts` - 四种段落的草稿和过期响应判断
//! - `compile_flow` - 收集条目并编译
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_generator` - 并发生成、全部等待、独立合并、汇总告警

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{ApiError, AppError, AppResult};
pub use infrastructure::{ApiClient, FileStore, KeyValueStore, MemoryStore};
pub use models::{BlurbMode, BlurbType};
pub use orchestrator::{generate_all, BatchReport, PARTIAL_FAILURE_WARNING};
pub use state::{SessionState, ThemePreference, ThemeState};
pub use workflow::BlurbDrafts;
