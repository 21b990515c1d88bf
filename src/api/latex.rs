//! 文档编译 API

use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{CompileRequest, CompileResponse};
use tracing::info;

/// 提交编译，返回 PDF 的相对路径
pub async fn compile_cv(client: &ApiClient, request: &CompileRequest) -> AppResult<CompileResponse> {
    info!(
        "📄 提交编译: 模板 {} | 字号 {} | 段落 {} | 经历 {} | 项目 {}",
        request.template,
        request.font_size,
        request.blurb_ids.len(),
        request.experience_ids.len(),
        request.project_ids.len()
    );
    client.post("/latex/compile", request).await
}

/// 按编译结果中的 `pdfUrl` 下载 PDF
pub async fn fetch_pdf(client: &ApiClient, pdf_path: &str) -> AppResult<Vec<u8>> {
    client.download(pdf_path).await
}

/// 按文件名下载 PDF
pub async fn download_pdf(client: &ApiClient, file_name: &str) -> AppResult<Vec<u8>> {
    client
        .download(&format!("/latex/download/{}", file_name))
        .await
}

/// 按文件名下载 .tex 源码
pub async fn download_tex(client: &ApiClient, file_name: &str) -> AppResult<Vec<u8>> {
    client
        .download(&format!("/latex/download-tex/{}", file_name))
        .await
}
