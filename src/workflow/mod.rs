pub mod blurb_drafts;
pub mod compile_flow;

pub use blurb_drafts::{ApplyResult, BlurbDraft, BlurbDrafts, DraftTicket};
pub use compile_flow::{compile_all, compile_and_download, CompileOptions};
