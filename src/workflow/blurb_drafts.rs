//! 段落草稿 - 流程层
//!
//! 四种段落各有一份草稿：内容、生成模式、是否已保存。
//! 草稿只在显式保存到后端时才持久化。
//!
//! 每份草稿带一个修订号，任何修改都会递增它。发起生成时记下当时的修订号
//! （[`DraftTicket`]），响应回来时如果修订号已经变化，说明用户在此期间
//! 手动改过内容，这个响应被丢弃，不会覆盖用户的修改。

use crate::models::{BlurbMode, BlurbType, GenerateBlurbRequest};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 单个类型的草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlurbDraft {
    pub content: String,
    pub mode: BlurbMode,
    pub saved: bool,
    revision: u64,
}

impl BlurbDraft {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn replace_content(&mut self, content: String) {
        self.content = content;
        self.saved = false;
        self.revision += 1;
    }
}

/// 发起生成时的草稿快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftTicket {
    pub blurb_type: BlurbType,
    revision: u64,
}

/// 生成结果的合并结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// 已写入草稿
    Applied,
    /// 草稿在请求期间被修改过，响应被丢弃
    Stale,
}

/// 全部类型的草稿集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurbDrafts {
    drafts: BTreeMap<BlurbType, BlurbDraft>,
}

impl Default for BlurbDrafts {
    fn default() -> Self {
        Self {
            drafts: BlurbType::ALL
                .into_iter()
                .map(|t| (t, BlurbDraft::default()))
                .collect(),
        }
    }
}

impl BlurbDrafts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, blurb_type: BlurbType) -> &BlurbDraft {
        // 构造时已经包含全部类型
        &self.drafts[&blurb_type]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlurbType, &BlurbDraft)> {
        self.drafts.iter().map(|(t, d)| (*t, d))
    }

    fn get_mut(&mut self, blurb_type: BlurbType) -> &mut BlurbDraft {
        self.drafts.entry(blurb_type).or_default()
    }

    /// 用户直接编辑
    pub fn edit(&mut self, blurb_type: BlurbType, content: impl Into<String>) {
        self.get_mut(blurb_type).replace_content(content.into());
    }

    /// 从已保存的段落中载入
    pub fn load_saved(&mut self, blurb_type: BlurbType, content: impl Into<String>) {
        self.edit(blurb_type, content);
        self.get_mut(blurb_type).saved = true;
    }

    pub fn set_mode(&mut self, blurb_type: BlurbType, mode: BlurbMode) {
        self.get_mut(blurb_type).mode = mode;
    }

    /// 保存到后端成功后调用
    pub fn mark_saved(&mut self, blurb_type: BlurbType) {
        self.get_mut(blurb_type).saved = true;
    }

    pub fn ticket(&self, blurb_type: BlurbType) -> DraftTicket {
        DraftTicket {
            blurb_type,
            revision: self.get(blurb_type).revision,
        }
    }

    /// 根据当前草稿构造生成请求，并记下快照
    ///
    /// 草稿为空时不发送 `previousBlurb`，职位 ID 为空时不发送 `jobDescriptionId`。
    pub fn generation_request(
        &self,
        blurb_type: BlurbType,
        job_description_id: Option<&str>,
    ) -> (GenerateBlurbRequest, DraftTicket) {
        let draft = self.get(blurb_type);
        let request = GenerateBlurbRequest {
            blurb_type,
            mode: draft.mode,
            previous_blurb: Some(draft.content.clone()).filter(|c| !c.is_empty()),
            job_description_id: job_description_id
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        };
        (request, self.ticket(blurb_type))
    }

    /// 合并生成结果
    pub fn apply_generated(&mut self, ticket: DraftTicket, text: String) -> ApplyResult {
        let draft = self.get_mut(ticket.blurb_type);
        if draft.revision != ticket.revision {
            warn!(
                "⚠️ 丢弃过期的生成结果: {} (请求时修订 {}，当前修订 {})",
                ticket.blurb_type, ticket.revision, draft.revision
            );
            return ApplyResult::Stale;
        }
        draft.replace_content(text);
        debug!("已写入生成结果: {}", ticket.blurb_type);
        ApplyResult::Applied
    }
}
