//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责命令分发和会话调度，不做查找或排版的具体判断。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 一次性命令：等待数据加载后执行预览或导出
//! - 交互模式：后台加载数据，逐条处理用户命令
//!
//! ### `shell` - 交互命令解析
//!
//! ## 层次关系
//!
//! ```text
//! app (命令分发)
//!     ↓
//! workflow::ViewerSession / ExportFlow (一次查看 / 一次导出)
//!     ↓
//! services (能力层：store / composer / renderer / preview / export_log)
//!     ↓
//! models (数据结构与加载)
//! ```

pub mod app;
pub mod shell;

pub use app::App;
pub use shell::ShellCommand;
