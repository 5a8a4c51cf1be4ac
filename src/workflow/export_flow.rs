//! 导出流程 - 流程层
//!
//! 流程顺序：
//! 1. 加载字体，创建渲染器
//! 2. 渲染 PDF 并写入输出目录
//! 3. 写导出日志（失败只记警告）

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::services::{ExportLog, PdfRenderer, RenderedDocument};
use crate::workflow::export_ctx::ExportCtx;

/// 导出流程
///
/// - 不做查找，也不做排版，只接收排好的文档
/// - 每次导出时加载字体，预览不依赖字体
pub struct ExportFlow {
    output_dir: PathBuf,
    font_dir: Option<String>,
    export_log: ExportLog,
}

impl ExportFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
            font_dir: config.font_dir.clone(),
            export_log: ExportLog::with_path(config.export_log_file.clone()),
        }
    }

    /// 使用指定的输出目录
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// 执行导出
    ///
    /// # 返回
    /// 返回生成的 PDF 路径
    pub async fn run(&self, ctx: &ExportCtx, document: &RenderedDocument) -> Result<PathBuf> {
        info!("{} 📄 开始导出 {}", ctx, document.file_name);

        let renderer = PdfRenderer::new(self.font_dir.as_deref()).context("无法创建PDF渲染器")?;
        let path = renderer
            .save(document, &self.output_dir)
            .await
            .with_context(|| format!("导出 {} 失败", document.file_name))?;

        if let Err(e) = self
            .export_log
            .record(&ctx.item_id, ctx.selection, &path)
            .await
        {
            warn!("⚠️ 写入导出日志失败: {}", e);
        }

        info!("✅ 已保存: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionSelection, WorkItemDetails, WorkItemRecord};
    use crate::services::ReportComposer;

    #[tokio::test]
    async fn test_run_writes_pdf_and_log_line() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("export_log.txt");
        let config = Config {
            font_dir: Some(concat!(env!("CARGO_MANIFEST_DIR"), "/fonts").to_string()),
            export_log_file: log_file.display().to_string(),
            ..Default::default()
        };
        let flow = ExportFlow::new(&config).with_output_dir(dir.path().join("out"));

        let record = WorkItemRecord {
            details: Some(WorkItemDetails {
                item_id: Some("A1".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let ctx = ExportCtx::new("A1", SectionSelection::all());
        let document = ReportComposer::default().compose("A1", &record, ctx.selection);

        let path = flow.run(&ctx, &document).await.unwrap();

        assert_eq!(path, dir.path().join("out").join("WorkItem_A1.pdf"));
        assert!(path.exists());
        let log = tokio::fs::read_to_string(&log_file).await.unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.contains("A1"));
    }
}
