//! 命令行参数

use crate::models::{Section, SectionSelection};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "work-item-viewer", version, about = "查看工作项并导出 PDF")]
pub struct Cli {
    /// 配置文件路径（默认读取 ./viewer.toml）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 数据源（本地 JSON 路径或 http(s) 地址），覆盖配置
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// 超出一页时分页
    #[arg(long, global = true)]
    pub paginate: bool,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 预览一个工作项
    Preview {
        /// 要查找的 ItemId
        item_id: String,
    },
    /// 导出一个工作项为 PDF
    Export {
        /// 要导出的 ItemId
        item_id: String,
        #[command(flatten)]
        sections: SectionFlags,
        /// 输出目录，覆盖配置
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// 交互模式（默认）
    Shell,
}

/// 导出时排除的部分
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct SectionFlags {
    /// 不导出基本信息
    #[arg(long)]
    pub no_details: bool,
    /// 不导出备注
    #[arg(long)]
    pub no_notes: bool,
    /// 不导出附件
    #[arg(long)]
    pub no_attachments: bool,
    /// 不导出审计记录
    #[arg(long)]
    pub no_audit: bool,
}

impl SectionFlags {
    pub fn selection(self) -> SectionSelection {
        SectionSelection::all()
            .with(Section::Details, !self.no_details)
            .with(Section::Notes, !self.no_notes)
            .with(Section::Attachments, !self.no_attachments)
            .with(Section::AuditHistory, !self.no_audit)
    }
}
