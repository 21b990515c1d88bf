//! 文本生成 API

use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{GenerateBlurbRequest, GenerateBlurbResponse, JobAnalysis};
use serde_json::json;
use tracing::debug;

/// 生成一个段落
///
/// # 返回
/// 返回生成的文本
pub async fn generate_blurb(client: &ApiClient, request: &GenerateBlurbRequest) -> AppResult<String> {
    debug!(
        "生成段落: type={} mode={} job={:?}",
        request.blurb_type, request.mode, request.job_description_id
    );
    let response: GenerateBlurbResponse = client.post("/agent/generate-blurb", request).await?;
    Ok(response.generated_blurb)
}

/// 分析职位描述，提取关键词、技能和资历
pub async fn analyze_job(client: &ApiClient, job_description_id: &str) -> AppResult<JobAnalysis> {
    client
        .post(
            "/agent/analyze-job",
            &json!({ "jobDescriptionId": job_description_id }),
        )
        .await
}
