//! 查看会话 - 流程层
//!
//! 保存一次查看过程中的界面状态：输入的 ItemId、选中的工作项、弹窗是否打开、
//! 四个复选框。所有操作同步执行，查找时不等待数据加载。

use crate::error::{AppError, AppResult, LookupError};
use crate::models::{Section, SectionSelection, WorkItemRecord};
use crate::services::{RenderedDocument, ReportComposer, WorkItemStore};
use crate::workflow::export_ctx::ExportCtx;
use tracing::{debug, info, warn};

/// 查看会话
pub struct ViewerSession {
    store: WorkItemStore,
    composer: ReportComposer,
    item_id: String,
    selected: Option<WorkItemRecord>,
    show_modal: bool,
    selection: SectionSelection,
}

impl ViewerSession {
    /// 创建新的会话，复选框默认全部勾选
    pub fn new(store: WorkItemStore, composer: ReportComposer) -> Self {
        Self {
            store,
            composer,
            item_id: String::new(),
            selected: None,
            show_modal: false,
            selection: SectionSelection::default(),
        }
    }

    pub fn store(&self) -> &WorkItemStore {
        &self.store
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn selected(&self) -> Option<&WorkItemRecord> {
        self.selected.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.show_modal
    }

    pub fn selection(&self) -> SectionSelection {
        self.selection
    }

    /// 预览：按 ItemId 查找，找到则打开弹窗
    ///
    /// 未找到时返回 `NotFound`，弹窗保持关闭
    pub fn preview(&mut self, item_id: &str) -> AppResult<&WorkItemRecord> {
        self.item_id = item_id.to_string();
        self.selected = self.store.find(item_id);

        match self.selected {
            Some(ref record) => {
                self.show_modal = true;
                info!("🔍 找到工作项 {}", item_id);
                Ok(record)
            }
            None => {
                self.show_modal = false;
                warn!(
                    "⚠️ 未找到工作项 {} (当前共 {} 条记录)",
                    item_id,
                    self.store.len()
                );
                Err(AppError::not_found(item_id))
            }
        }
    }

    /// 关闭弹窗
    pub fn close_modal(&mut self) {
        self.show_modal = false;
    }

    /// 勾选/取消某个部分
    pub fn set_section(&mut self, section: Section, selected: bool) {
        self.selection.set(section, selected);
        debug!("复选框 {} -> {}", section, selected);
    }

    /// 按当前复选框状态排版选中的工作项
    pub fn compose_download(&self) -> AppResult<(ExportCtx, RenderedDocument)> {
        let record = self.selected.as_ref().ok_or(LookupError::NothingSelected)?;
        let ctx = ExportCtx::new(self.item_id.clone(), self.selection);
        let document = self.composer.compose(&ctx.item_id, record, ctx.selection);
        Ok((ctx, document))
    }
}
