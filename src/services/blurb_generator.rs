//! 段落生成能力 - 业务能力层
//!
//! 只负责"生成一个段落"，不关心批量和合并。

use crate::api;
use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::GenerateBlurbRequest;
use async_trait::async_trait;

/// 段落生成能力
///
/// 编排层只依赖这个 trait，测试可以替换为假的实现。
#[async_trait]
pub trait BlurbGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateBlurbRequest) -> AppResult<String>;
}

#[async_trait]
impl BlurbGenerator for ApiClient {
    async fn generate(&self, request: &GenerateBlurbRequest) -> AppResult<String> {
        api::agent::generate_blurb(self, request).await
    }
}
