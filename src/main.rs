use anyhow::Result;
use clap::Parser;
use work_item_viewer::cli::Cli;
use work_item_viewer::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.source {
        config.data_source = source;
    }
    config.paginate |= cli.paginate;
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run(cli.command).await
}
