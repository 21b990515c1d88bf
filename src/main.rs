use anyhow::Result;
use clap::Parser;
use cv_builder_client::cli::Cli;
use cv_builder_client::utils::logging;
use cv_builder_client::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }

    // 初始化日志
    logging::init(config.verbose_logging || cli.verbose);

    // 初始化并运行应用
    let app = App::initialize(config)?;
    if let Err(e) = app.run(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
