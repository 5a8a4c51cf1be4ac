//! # Work Item Viewer
//!
//! 加载工作项数据集，按 ItemId 查找并预览，把选中的部分导出为 PDF
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 工作项结构、部分选择、JSON 加载（本地文件或 HTTP）
//!
//! ### ② 业务能力层（Services）
//! - `WorkItemStore` - 持有工作项集合，按 ItemId 查找
//! - `ReportComposer` - 固定网格排版，输出 `RenderedDocument`
//! - `PdfRenderer` - 用 genpdf 绘制 PDF
//! - `render_preview` - 纯文本预览
//! - `ExportLog` - 写导出日志
//!
//! ### ③ 流程层（Workflow）
//! - `ViewerSession` - 输入 / 预览 / 复选框 / 下载 的状态
//! - `ExportFlow` - 渲染 → 保存 → 记日志
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令分发、数据加载
//!
//! ## 模块结构

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Section, SectionSelection, WorkItemRecord};
pub use orchestrator::App;
pub use services::{find_by_id, RenderedDocument, ReportComposer, WorkItemStore};
pub use workflow::{ExportCtx, ExportFlow, ViewerSession};
