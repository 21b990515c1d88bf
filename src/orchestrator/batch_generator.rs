//! 批量段落生成器 - 编排层
//!
//! ## 职责
//!
//! 对一组固定的段落类型同时发起生成请求，等待全部完成后再合并结果。
//!
//! ## 核心规则
//!
//! 1. **全部并发**：每个类型一个请求，同时发出
//! 2. **全部等待**：不在第一个失败时提前返回，每个请求都必须结束
//! 3. **独立合并**：成功的写入对应草稿并清除"已保存"标记；失败的保留原内容
//! 4. **汇总告警**：只要有失败，只报告一条汇总告警，不回滚成功的结果
//!
//! 各类型之间没有顺序保证，每个结果恰好合并一次。

use crate::api;
use crate::error::AppResult;
use crate::infrastructure::ApiClient;
use crate::models::{BlurbType, NewBlurb};
use crate::services::BlurbGenerator;
use crate::utils::logging;
use crate::workflow::{ApplyResult, BlurbDrafts, DraftTicket};
use futures::future::join_all;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use tracing::{info, warn};

/// 部分失败时的汇总告警
pub const PARTIAL_FAILURE_WARNING: &str = "Some blurbs failed to generate.";

/// 对每个键独立执行 `f`，全部结束后返回 键 → 结果
///
/// 任何一个失败都不会取消或阻塞其他键。
pub async fn settle_all<K, T, F, Fut>(keys: impl IntoIterator<Item = K>, f: F) -> BTreeMap<K, AppResult<T>>
where
    K: Ord + Copy,
    F: Fn(K) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let tasks = keys.into_iter().map(|key| {
        let task = f(key);
        async move { (key, task.await) }
    });
    join_all(tasks).await.into_iter().collect()
}

/// 一次批量生成的原始结果
///
/// 键集合恰好是请求的类型集合。
#[derive(Debug)]
pub struct BatchOutcome {
    results: BTreeMap<BlurbType, (DraftTicket, AppResult<String>)>,
}

impl BatchOutcome {
    pub fn types(&self) -> impl Iterator<Item = BlurbType> + '_ {
        self.results.keys().copied()
    }

    pub fn result(&self, blurb_type: BlurbType) -> Option<&AppResult<String>> {
        self.results.get(&blurb_type).map(|(_, r)| r)
    }

    pub fn failed_count(&self) -> usize {
        self.results.values().filter(|(_, r)| r.is_err()).count()
    }

    /// 合并进草稿集合
    pub fn merge_into(self, drafts: &mut BlurbDrafts) -> BatchReport {
        let mut report = BatchReport::default();

        for (blurb_type, (ticket, result)) in self.results {
            match result {
                Ok(text) => match drafts.apply_generated(ticket, text) {
                    ApplyResult::Applied => report.updated.push(blurb_type),
                    ApplyResult::Stale => report.stale.push(blurb_type),
                },
                Err(e) => {
                    warn!("⚠️ 段落生成失败: {} - {}", blurb_type, e);
                    report.failed.push((blurb_type, e.to_string()));
                }
            }
        }

        if !report.failed.is_empty() {
            report.warning = Some(PARTIAL_FAILURE_WARNING.to_string());
        }

        report
    }
}

/// 合并后的汇总
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// 已写入草稿的类型
    pub updated: Vec<BlurbType>,
    /// 失败的类型及其错误消息
    pub failed: Vec<(BlurbType, String)>,
    /// 成功但因草稿被手动修改而丢弃的类型
    pub stale: Vec<BlurbType>,
    /// 汇总告警，最多一条
    pub warning: Option<String>,
}

impl BatchReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty() && self.warning.is_none()
    }
}

/// 并发生成指定类型，不修改草稿
///
/// 请求内容和快照在发起时从 `drafts` 读取；合并由调用方通过
/// [`BatchOutcome::merge_into`] 完成，期间草稿可以继续被编辑。
pub async fn run_batch<G>(
    generator: &G,
    drafts: &BlurbDrafts,
    types: &[BlurbType],
    job_description_id: Option<&str>,
) -> BatchOutcome
where
    G: BlurbGenerator + ?Sized,
{
    let requested: BTreeSet<BlurbType> = types.iter().copied().collect();
    let prepared: BTreeMap<_, _> = requested
        .iter()
        .map(|t| (*t, drafts.generation_request(*t, job_description_id)))
        .collect();

    logging::log_batch_start(requested.len(), job_description_id);

    let requests = &prepared;
    let settled = settle_all(requested.iter().copied(), move |blurb_type| {
        generator.generate(&requests[&blurb_type].0)
    })
    .await;

    let results = settled
        .into_iter()
        .map(|(blurb_type, result)| (blurb_type, (prepared[&blurb_type].1, result)))
        .collect();

    BatchOutcome { results }
}

/// 生成全部四种段落并合并
pub async fn generate_all<G>(
    generator: &G,
    drafts: &mut BlurbDrafts,
    job_description_id: Option<&str>,
) -> BatchReport
where
    G: BlurbGenerator + ?Sized,
{
    let outcome = run_batch(generator, drafts, &BlurbType::ALL, job_description_id).await;
    let report = outcome.merge_into(drafts);
    logging::log_batch_complete(&report);
    report
}

/// 生成单个段落并合并
///
/// 失败直接返回错误消息，草稿保持不变。
pub async fn generate_single<G>(
    generator: &G,
    drafts: &mut BlurbDrafts,
    blurb_type: BlurbType,
    job_description_id: Option<&str>,
) -> AppResult<ApplyResult>
where
    G: BlurbGenerator + ?Sized,
{
    let (request, ticket) = drafts.generation_request(blurb_type, job_description_id);
    let text = generator.generate(&request).await?;
    let applied = drafts.apply_generated(ticket, text);
    info!("✓ 段落生成完成: {} ({:?})", blurb_type, applied);
    Ok(applied)
}

/// 批量保存的汇总
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: Vec<BlurbType>,
    pub failed: Vec<(BlurbType, String)>,
}

/// 把指定类型的草稿全部保存到后端
///
/// 与生成相同：每个类型独立请求，一个失败不影响其他类型，
/// 成功的草稿标记为已保存。
pub async fn save_all(
    client: &ApiClient,
    drafts: &mut BlurbDrafts,
    types: &[BlurbType],
    job_description_id: Option<&str>,
) -> SaveReport {
    let job_description_id = job_description_id.filter(|id| !id.is_empty());
    let requested: BTreeSet<BlurbType> = types.iter().copied().collect();
    let pending: BTreeMap<_, _> = requested
        .iter()
        .map(|t| {
            let blurb = NewBlurb {
                blurb_type: *t,
                content: drafts.get(*t).content.clone(),
                job_description_id: job_description_id.map(str::to_string),
            };
            (*t, blurb)
        })
        .collect();

    let blurbs = &pending;
    let settled = settle_all(requested.iter().copied(), move |blurb_type| {
        api::save_blurb(client, &blurbs[&blurb_type])
    })
    .await;

    let mut report = SaveReport::default();
    for (blurb_type, result) in settled {
        match result {
            Ok(saved) => {
                drafts.mark_saved(blurb_type);
                info!("✓ 段落已保存: {} ({})", blurb_type, saved.id);
                report.saved.push(blurb_type);
            }
            Err(e) => {
                warn!("⚠️ 段落保存失败: {} - {}", blurb_type, e);
                report.failed.push((blurb_type, e.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{BlurbMode, GenerateBlurbRequest};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// 假生成器：指定类型失败，其余返回 "<type>:<mode>"
    struct FakeGenerator {
        failing: Vec<BlurbType>,
        calls: AtomicUsize,
        seen: Mutex<Vec<GenerateBlurbRequest>>,
    }

    impl FakeGenerator {
        fn failing(failing: &[BlurbType]) -> Self {
            Self {
                failing: failing.to_vec(),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BlurbGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerateBlurbRequest) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            // 失败的请求先结束，验证其余请求不会被取消
            if self.failing.contains(&request.blurb_type) {
                return Err(AppError::Other("model overloaded".to_string()));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok(format!("{}:{}", request.blurb_type, request.mode))
        }
    }

    fn drafts_with_content() -> BlurbDrafts {
        let mut drafts = BlurbDrafts::new();
        for t in BlurbType::ALL {
            drafts.edit(t, format!("old {}", t));
            drafts.mark_saved(t);
        }
        drafts
    }

    #[tokio::test]
    async fn test_one_failure_keeps_other_three() {
        let generator = FakeGenerator::failing(&[BlurbType::Skills]);
        let mut drafts = drafts_with_content();

        let report = generate_all(&generator, &mut drafts, Some("job-1")).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 4);
        assert_eq!(report.updated.len(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, BlurbType::Skills);
        assert_eq!(report.warning.as_deref(), Some(PARTIAL_FAILURE_WARNING));

        assert_eq!(drafts.get(BlurbType::Skills).content, "old skills");
        assert!(drafts.get(BlurbType::Skills).saved);
        for t in [BlurbType::Summary, BlurbType::Motivation, BlurbType::Closing] {
            assert_eq!(drafts.get(t).content, format!("{}:full", t));
            assert!(!drafts.get(t).saved);
        }
    }

    #[tokio::test]
    async fn test_all_succeed_reports_no_warning() {
        let generator = FakeGenerator::failing(&[]);
        let mut drafts = BlurbDrafts::new();
        drafts.set_mode(BlurbType::Closing, BlurbMode::DoubleCheck);

        let report = generate_all(&generator, &mut drafts, None).await;

        assert!(report.is_complete_success());
        assert_eq!(report.updated, BlurbType::ALL.to_vec());
        assert_eq!(drafts.get(BlurbType::Closing).content, "closing:double-check");

        let seen = generator.seen.lock().unwrap();
        assert!(seen.iter().all(|r| r.job_description_id.is_none()));
        assert!(seen.iter().all(|r| r.previous_blurb.is_none()));
    }

    #[tokio::test]
    async fn test_all_fail_reports_single_warning() {
        let generator = FakeGenerator::failing(&BlurbType::ALL);
        let mut drafts = drafts_with_content();
        let before = drafts.clone();

        let report = generate_all(&generator, &mut drafts, None).await;

        assert!(report.updated.is_empty());
        assert_eq!(report.failed.len(), 4);
        assert_eq!(report.warning.as_deref(), Some(PARTIAL_FAILURE_WARNING));
        assert_eq!(drafts, before);
    }

    #[tokio::test]
    async fn test_edit_between_run_and_merge_is_not_clobbered() {
        let generator = FakeGenerator::failing(&[]);
        let mut drafts = BlurbDrafts::new();

        let outcome = run_batch(&generator, &drafts, &BlurbType::ALL, None).await;
        drafts.edit(BlurbType::Motivation, "my own words");
        let report = outcome.merge_into(&mut drafts);

        assert_eq!(report.stale, vec![BlurbType::Motivation]);
        assert_eq!(report.updated.len(), 3);
        assert_eq!(drafts.get(BlurbType::Motivation).content, "my own words");
        assert!(report.warning.is_none());
    }

    #[tokio::test]
    async fn test_outcome_keys_match_requested_types() {
        let generator = FakeGenerator::failing(&[]);
        let drafts = BlurbDrafts::new();

        let outcome = run_batch(
            &generator,
            &drafts,
            &[BlurbType::Closing, BlurbType::Summary, BlurbType::Closing],
            None,
        )
        .await;

        let types: Vec<_> = outcome.types().collect();
        assert_eq!(types, vec![BlurbType::Summary, BlurbType::Closing]);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
        assert!(outcome.result(BlurbType::Skills).is_none());
    }

    #[tokio::test]
    async fn test_single_failure_leaves_draft_untouched() {
        let generator = FakeGenerator::failing(&[BlurbType::Summary]);
        let mut drafts = drafts_with_content();

        let err = generate_single(&generator, &mut drafts, BlurbType::Summary, None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "model overloaded");
        assert_eq!(drafts.get(BlurbType::Summary).content, "old summary");
    }

    #[test]
    fn test_settle_all_runs_every_key() {
        let results = tokio_test::block_on(settle_all([1u8, 2, 3], |k| async move {
            if k == 2 {
                Err(AppError::Other("two".to_string()))
            } else {
                Ok(k * 10)
            }
        }));

        assert_eq!(results.len(), 3);
        assert_eq!(*results[&1].as_ref().unwrap(), 10);
        assert!(results[&2].is_err());
        assert_eq!(*results[&3].as_ref().unwrap(), 30);
    }
}
