//! 数据导出 / 导入 API

use crate::error::{AppError, AppResult};
use crate::infrastructure::ApiClient;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::info;

/// 导出全部数据，写入本地归档文件
///
/// # 返回
/// 返回写入的字节数
pub async fn export_data(client: &ApiClient, destination: &Path) -> AppResult<usize> {
    let bytes = client.download("/export").await?;
    tokio::fs::write(destination, &bytes)
        .await
        .map_err(|e| AppError::Other(format!("Could not write {}: {}", destination.display(), e)))?;
    info!("✓ 导出完成: {} ({} 字节)", destination.display(), bytes.len());
    Ok(bytes.len())
}

/// 上传归档文件导入数据（multipart 字段名 `file`）
pub async fn import_data(client: &ApiClient, archive: &Path) -> AppResult<()> {
    let form = Form::new().part("file", file_part(archive).await?);
    client.post_multipart_void("/import", form).await?;
    info!("✓ 导入完成: {}", archive.display());
    Ok(())
}

/// 读取本地文件，构造带文件名的 multipart 字段
pub(crate) async fn file_part(path: &Path) -> AppResult<Part> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Other(format!("Could not read {}: {}", path.display(), e)))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(file_name))
}
