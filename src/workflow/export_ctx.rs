//! 导出上下文
//!
//! 封装"导出哪个 ItemId、勾选了哪些部分"这一信息

use crate::models::SectionSelection;
use std::fmt::Display;

/// 导出上下文
#[derive(Debug, Clone, PartialEq)]
pub struct ExportCtx {
    /// 用户输入的 ItemId（决定文件名）
    pub item_id: String,

    /// 点击下载时读取的复选框状态
    pub selection: SectionSelection,
}

impl ExportCtx {
    pub fn new(item_id: impl Into<String>, selection: SectionSelection) -> Self {
        Self {
            item_id: item_id.into(),
            selection,
        }
    }
}

impl Display for ExportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ItemId#{} {}]", self.item_id, self.selection)
    }
}
