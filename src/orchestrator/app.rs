//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息，创建存储、排版器和导出流程
//! 2. **数据加载**：一次性命令等待加载完成；交互模式只在后台启动加载
//! 3. **命令分发**：预览 / 导出 / 交互模式
//!
//! 交互模式中的操作逐条串行执行，加载尚未完成时查找的是空集合。

use crate::cli::{Command, SectionFlags};
use crate::config::Config;
use crate::error::{AppError, LookupError};
use crate::models::{DataSource, Section};
use crate::orchestrator::shell::ShellCommand;
use crate::services::{render_preview, LayoutOptions, ReportComposer, WorkItemStore};
use crate::utils::{log_records_loaded, log_startup, print_shell_help, truncate_text};
use crate::workflow::{ExportFlow, ViewerSession};
use anyhow::Result;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    store: WorkItemStore,
    export_flow: ExportFlow,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let store = WorkItemStore::new(DataSource::parse(&config.data_source));
        let export_flow = ExportFlow::new(&config);

        Self {
            config,
            store,
            export_flow,
        }
    }

    pub fn store(&self) -> &WorkItemStore {
        &self.store
    }

    fn composer(&self) -> ReportComposer {
        ReportComposer::new(LayoutOptions {
            paginate: self.config.paginate,
            ..Default::default()
        })
    }

    /// 运行命令，未指定时进入交互模式
    pub async fn run(self, command: Option<Command>) -> Result<()> {
        match command {
            Some(Command::Preview { item_id }) => self.run_preview(&item_id).await,
            Some(Command::Export {
                item_id,
                sections,
                out,
            }) => self.run_export(&item_id, sections, out).await,
            Some(Command::Shell) | None => self.run_shell().await,
        }
    }

    /// 等待加载完成（一次性命令使用）
    async fn load_blocking(&self) -> Result<()> {
        info!("\n📁 正在加载工作项: {}", self.store.source());
        let count = self.store.load_all().await?;
        log_records_loaded(count);
        Ok(())
    }

    async fn run_preview(&self, item_id: &str) -> Result<()> {
        self.load_blocking().await?;

        let mut session = ViewerSession::new(self.store.clone(), self.composer());
        let record = session.preview(item_id)?;
        println!("{}", render_preview(record));
        Ok(())
    }

    async fn run_export(
        self,
        item_id: &str,
        sections: SectionFlags,
        out: Option<PathBuf>,
    ) -> Result<()> {
        self.load_blocking().await?;

        let composer = self.composer();
        let mut session = ViewerSession::new(self.store.clone(), composer);
        session.preview(item_id)?;
        let selection = sections.selection();
        for section in Section::ALL {
            session.set_section(section, selection.is_selected(section));
        }

        let (ctx, document) = session.compose_download()?;
        let flow = match out {
            Some(dir) => self.export_flow.with_output_dir(dir),
            None => self.export_flow,
        };
        let path = flow.run(&ctx, &document).await?;
        println!("{}", path.display());
        Ok(())
    }

    async fn run_shell(&self) -> Result<()> {
        // 后台加载，不等待
        let _load = self.store.spawn_load();

        let mut session = ViewerSession::new(self.store.clone(), self.composer());
        print_shell_help();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match ShellCommand::parse(&line) {
                ShellCommand::Preview(item_id) => match session.preview(&item_id) {
                    Ok(record) => println!("{}", render_preview(record)),
                    Err(e) => println!("{}", e),
                },
                ShellCommand::Check(section) => session.set_section(section, true),
                ShellCommand::Uncheck(section) => session.set_section(section, false),
                ShellCommand::Sections => println!("{}", session.selection()),
                ShellCommand::Download => self.download(&session).await,
                ShellCommand::Close => session.close_modal(),
                ShellCommand::Reload => match self.store.load_all().await {
                    Ok(count) => log_records_loaded(count),
                    Err(e) => error!("❌ 重新加载失败: {}", e),
                },
                ShellCommand::Help => print_shell_help(),
                ShellCommand::Quit => break,
                ShellCommand::Empty => {}
                ShellCommand::Unknown(input) => {
                    warn!("未知命令: {}", truncate_text(&input, 40));
                }
            }
        }

        info!("👋 会话结束");
        Ok(())
    }

    async fn download(&self, session: &ViewerSession) {
        if !session.is_modal_open() {
            println!("{}", AppError::from(LookupError::NothingSelected));
            return;
        }
        let result = match session.compose_download() {
            Ok((ctx, document)) => self.export_flow.run(&ctx, &document).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(path) => println!("已保存: {}", path.display()),
            Err(e) => error!("❌ 导出失败: {:#}", e),
        }
    }
}
