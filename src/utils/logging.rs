//! 日志工具模块
//!
//! 初始化 tracing 订阅者，并提供批量生成的日志格式化函数

use crate::orchestrator::BatchReport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时按 `verbose` 选择 debug 或 info。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cv_builder_client={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录批量生成开始
///
/// # 参数
/// - `total`: 本批类型数量
/// - `job_description_id`: 目标职位（可选）
pub fn log_batch_start(total: usize, job_description_id: Option<&str>) {
    info!("{}", "=".repeat(60));
    info!("📦 开始批量生成 {} 个段落", total);
    if let Some(job) = job_description_id {
        info!("🎯 目标职位: {}", job);
    }
    info!("{}", "=".repeat(60));
}

/// 记录批量生成结果
pub fn log_batch_complete(report: &BatchReport) {
    let total = report.updated.len() + report.failed.len() + report.stale.len();
    info!("{}", "─".repeat(60));
    info!(
        "📊 批量生成完成 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", report.updated.len(), total);
    if !report.stale.is_empty() {
        info!("⏭️ 丢弃（草稿已被修改）: {}", report.stale.len());
    }
    if !report.failed.is_empty() {
        warn!("❌ 失败: {}", report.failed.len());
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("简历生成工具", 2), "简历...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
