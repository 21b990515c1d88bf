//! API 模块
//!
//! 每个后端资源一个文件，全部是基于 [`ApiClient`](crate::infrastructure::ApiClient)
//! 的无状态函数。

pub mod agent;
pub mod api_keys;
pub mod auth;
pub mod blurbs;
pub mod experiences;
pub mod export_import;
pub mod job_descriptions;
pub mod latex;
pub mod profile;
pub mod projects;

// 重新导出常用函数
pub use agent::{analyze_job, generate_blurb};
pub use blurbs::{delete_blurb, list_blurbs, save_blurb, update_blurb};
pub use latex::compile_cv;
