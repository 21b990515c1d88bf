//! 编译流程 - 流程层
//!
//! 并行取回全部经历、项目和已保存段落，再把所有 ID 交给编译服务。
//! 三个列表请求任一失败即整体失败。

use crate::api;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::ApiClient;
use crate::models::{CompileRequest, CompileResponse};
use std::path::{Path, PathBuf};
use tracing::info;

/// 编译选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub template: String,
    pub font_size: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            template: "modern-1".to_string(),
            font_size: 11,
        }
    }
}

impl From<&Config> for CompileOptions {
    fn from(config: &Config) -> Self {
        Self {
            template: config.compile_template.clone(),
            font_size: config.compile_font_size,
        }
    }
}

/// 收集全部条目并编译
pub async fn compile_all(client: &ApiClient, options: &CompileOptions) -> AppResult<CompileResponse> {
    let (experiences, projects, blurbs) = tokio::try_join!(
        api::experiences::list_experiences(client),
        api::projects::list_projects(client),
        api::blurbs::list_blurbs(client, None),
    )?;

    let request = CompileRequest {
        template: options.template.clone(),
        font_size: options.font_size,
        blurb_ids: blurbs.into_iter().map(|b| b.id).collect(),
        experience_ids: experiences.into_iter().map(|e| e.id).collect(),
        project_ids: projects.into_iter().map(|p| p.id).collect(),
    };

    api::latex::compile_cv(client, &request).await
}

/// 编译并把 PDF 下载到指定目录
///
/// # 返回
/// 返回写入的 PDF 路径
pub async fn compile_and_download(
    client: &ApiClient,
    options: &CompileOptions,
    output_dir: &Path,
) -> AppResult<PathBuf> {
    let compiled = compile_all(client, options).await?;
    let file_name = compiled.file_name().unwrap_or("cv.pdf").to_string();

    let pdf = api::latex::fetch_pdf(client, &compiled.pdf_url).await?;
    let destination = output_dir.join(file_name);
    tokio::fs::write(&destination, &pdf)
        .await
        .map_err(|e| AppError::Other(format!("Could not write {}: {}", destination.display(), e)))?;

    info!("✓ PDF 已保存至: {}", destination.display());
    Ok(destination)
}
