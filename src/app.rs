//! 应用入口
//!
//! 持有配置、持久化存储、会话和 API 客户端，把命令分发到各层。
//! 所有错误都在这里变成一条消息返回给 `main`，不会导致崩溃。

use crate::api;
use crate::cli::{BlurbsCommand, Command, ResetPasswordCommand, ThemeCommand};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ApiClient, FileStore, KeyValueStore};
use crate::models::{BlurbMode, BlurbType, NewBlurb};
use crate::orchestrator;
use crate::services::AuthService;
use crate::state::{SessionState, TerminalAppearance, ThemePreference, ThemeState};
use crate::utils::logging::{self, truncate_text};
use crate::workflow::{self, BlurbDrafts, CompileOptions};
use std::sync::Arc;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    store: Arc<dyn KeyValueStore>,
    client: ApiClient,
}

impl App {
    /// 初始化应用：打开持久化存储并恢复会话
    pub fn initialize(config: Config) -> AppResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_path));
        Self::with_store(config, store)
    }

    /// 使用指定存储初始化
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let session = Arc::new(SessionState::load(store.clone())?);
        let client = ApiClient::new(&config.api_base_url, session);

        info!("🚀 后端地址: {}", config.api_base_url);

        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// 执行一条命令
    pub async fn run(&self, command: Command) -> AppResult<()> {
        match command {
            Command::Login { email, password } => {
                let res = self.auth().login(&email, &password).await?;
                println!("Logged in as {}", res.user_id);
            }
            Command::Register { email } => {
                let res = self.auth().register(&email).await?;
                println!("Registered {}", res.user_id);
                println!("Generated password: {}", res.generated_password);
            }
            Command::Logout => {
                if !self.auth().logout().await? {
                    println!("Server logout failed; local session cleared anyway");
                }
                println!("Logged out");
            }
            Command::ResetPassword(ResetPasswordCommand::Request { email }) => {
                self.auth().request_password_reset(&email).await?;
                println!("Password reset email requested");
            }
            Command::ResetPassword(ResetPasswordCommand::Confirm {
                token,
                new_password,
            }) => {
                self.auth().confirm_password_reset(&token, &new_password).await?;
                println!("Password updated");
            }
            Command::Whoami => {
                if self.client.session().is_authenticated() {
                    println!("authenticated");
                } else {
                    println!("anonymous");
                }
            }
            Command::Theme(cmd) => self.theme(cmd)?,
            Command::Generate {
                types,
                mode,
                job,
                save,
            } => {
                self.client.session().require_token()?;
                self.generate(&types, &mode, job.as_deref(), save).await?;
            }
            Command::Blurbs(cmd) => {
                self.client.session().require_token()?;
                self.blurbs(cmd).await?;
            }
            Command::AnalyzeJob { id } => {
                self.client.session().require_token()?;
                let analysis = api::analyze_job(&self.client, &id).await?;
                println!("Seniority: {}", analysis.seniority_level);
                println!("Keywords: {}", analysis.keywords.join(", "));
                println!("Required skills: {}", analysis.required_skills.join(", "));
            }
            Command::Compile {
                output,
                template,
                font_size,
            } => {
                self.client.session().require_token()?;
                let mut options = CompileOptions::from(&self.config);
                if let Some(template) = template {
                    options.template = template;
                }
                if let Some(font_size) = font_size {
                    options.font_size = font_size;
                }
                let path = workflow::compile_and_download(&self.client, &options, &output).await?;
                println!("CV compiled: {}", path.display());
            }
            Command::Export { output } => {
                self.client.session().require_token()?;
                let bytes = api::export_import::export_data(&self.client, &output).await?;
                println!("Exported {} bytes to {}", bytes, output.display());
            }
            Command::Import { archive } => {
                self.client.session().require_token()?;
                api::export_import::import_data(&self.client, &archive).await?;
                println!("Imported {}", archive.display());
            }
        }
        Ok(())
    }

    fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    fn theme(&self, cmd: ThemeCommand) -> AppResult<()> {
        let mut theme = ThemeState::load(
            self.store.clone(),
            Box::new(TerminalAppearance),
            ThemePreference::default(),
        )?;

        if let ThemeCommand::Set { value } = cmd {
            let preference = ThemePreference::parse(&value)
                .ok_or_else(|| AppError::Other(format!("Unknown theme '{}'", value)))?;
            theme.set(preference)?;
        }

        println!("{} ({})", theme.preference(), theme.appearance());
        Ok(())
    }

    async fn generate(
        &self,
        types: &[String],
        mode: &str,
        job: Option<&str>,
        save: bool,
    ) -> AppResult<()> {
        let mode = BlurbMode::parse(mode)
            .ok_or_else(|| AppError::Other(format!("Unknown mode '{}'", mode)))?;
        let types = parse_types(types)?;
        let job = job.filter(|id| !id.is_empty());

        let mut drafts = BlurbDrafts::new();
        for t in &types {
            drafts.set_mode(*t, mode);
        }

        let report = if types.len() == 1 {
            let mut report = orchestrator::BatchReport::default();
            orchestrator::generate_single(&self.client, &mut drafts, types[0], job).await?;
            report.updated.push(types[0]);
            report
        } else {
            let outcome = orchestrator::run_batch(&self.client, &drafts, &types, job).await;
            let report = outcome.merge_into(&mut drafts);
            logging::log_batch_complete(&report);
            report
        };

        for t in &report.updated {
            println!("[{}]\n{}\n", t.label(), drafts.get(*t).content);
        }
        for (t, message) in &report.failed {
            println!("[{}] failed: {}", t.label(), message);
        }
        if let Some(warning) = &report.warning {
            println!("{}", warning);
        }

        if save {
            let saved = orchestrator::save_all(&self.client, &mut drafts, &report.updated, job).await;
            for t in &saved.saved {
                println!("Saved {}", t);
            }
            for (t, message) in &saved.failed {
                println!("[{}] not saved: {}", t.label(), message);
            }
            if !saved.failed.is_empty() {
                return Err(AppError::Other(format!(
                    "{} of {} blurbs could not be saved",
                    saved.failed.len(),
                    report.updated.len()
                )));
            }
        }

        Ok(())
    }

    async fn blurbs(&self, cmd: BlurbsCommand) -> AppResult<()> {
        match cmd {
            BlurbsCommand::List { job } => {
                let blurbs = api::list_blurbs(&self.client, job.as_deref()).await?;
                if blurbs.is_empty() {
                    println!("No saved blurbs");
                }
                for blurb in blurbs {
                    let linked = if blurb.job_description_id.is_some() {
                        " (linked to job)"
                    } else {
                        ""
                    };
                    println!(
                        "{}  {:<10} {}{}",
                        blurb.id,
                        blurb.blurb_type,
                        truncate_text(&blurb.content, 60),
                        linked
                    );
                }
            }
            BlurbsCommand::Save {
                blurb_type,
                content,
                job,
            } => {
                let blurb_type = parse_type(&blurb_type)?;
                let saved = api::save_blurb(
                    &self.client,
                    &NewBlurb {
                        blurb_type,
                        content,
                        job_description_id: job.filter(|id| !id.is_empty()),
                    },
                )
                .await?;
                println!("Saved {}", saved.id);
            }
            BlurbsCommand::Delete { id } => {
                api::delete_blurb(&self.client, &id).await?;
                println!("Deleted {}", id);
            }
        }
        Ok(())
    }
}

fn parse_type(s: &str) -> AppResult<BlurbType> {
    BlurbType::parse(s).ok_or_else(|| AppError::Other(format!("Unknown blurb type '{}'", s)))
}

/// 未指定类型时生成全部四种
fn parse_types(types: &[String]) -> AppResult<Vec<BlurbType>> {
    if types.is_empty() {
        return Ok(BlurbType::ALL.to_vec());
    }
    types.iter().map(|t| parse_type(t)).collect()
}
