//! 导出日志服务 - 业务能力层
//!
//! 只负责"追加一行导出记录"，不关心导出流程

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::models::SectionSelection;

/// 导出日志
pub struct ExportLog {
    log_file_path: String,
}

impl ExportLog {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    /// 记录一次导出
    ///
    /// # 参数
    /// - `item_id`: 用户输入的 ItemId
    /// - `selection`: 导出时的复选框状态
    /// - `output`: 生成的文件路径
    pub async fn record(
        &self,
        item_id: &str,
        selection: SectionSelection,
        output: &Path,
    ) -> Result<()> {
        let line = format_entry(
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            item_id,
            selection,
            output,
        );
        debug!("写入导出日志: {}", line.trim_end());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .await
            .with_context(|| format!("无法打开导出日志: {}", self.log_file_path))?;

        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}

fn format_entry(timestamp: &str, item_id: &str, selection: SectionSelection, output: &Path) -> String {
    format!(
        "{} | ItemId {} | {} | {}\n",
        timestamp,
        item_id,
        selection,
        output.display()
    )
}
