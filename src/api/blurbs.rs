//! 段落 API

use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{Blurb, NewBlurb};
use serde_json::json;

/// 列出已保存的段落
///
/// # 参数
/// - `job_description_id`: 只返回关联到该职位的段落；None 或空字符串返回全部
pub async fn list_blurbs(client: &ApiClient, job_description_id: Option<&str>) -> AppResult<Vec<Blurb>> {
    match job_description_id.filter(|id| !id.is_empty()) {
        Some(id) => {
            client
                .get_with_query("/blurbs", &[("jobDescriptionId", id)])
                .await
        }
        None => client.get("/blurbs").await,
    }
}

pub async fn save_blurb(client: &ApiClient, blurb: &NewBlurb) -> AppResult<Blurb> {
    client.post("/blurbs", blurb).await
}

/// 只更新内容，类型和职位关联不变
pub async fn update_blurb(client: &ApiClient, id: &str, content: &str) -> AppResult<Blurb> {
    client
        .put(&format!("/blurbs/{}", id), &json!({ "content": content }))
        .await
}

pub async fn delete_blurb(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(&format!("/blurbs/{}", id)).await
}
