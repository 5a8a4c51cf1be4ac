//! 导出时选择的文档部分

use std::fmt;
use std::str::FromStr;

/// 文档的四个可选部分，顺序即输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Details,
    Notes,
    Attachments,
    AuditHistory,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Details,
        Section::Notes,
        Section::Attachments,
        Section::AuditHistory,
    ];

    /// 文档中的标题
    pub fn title(self) -> &'static str {
        match self {
            Section::Details => "Work Item Details:",
            Section::Notes => "Work Item Notes:",
            Section::Attachments => "Work Item Attachments:",
            Section::AuditHistory => "Work Item Audit History:",
        }
    }

    /// 列表为空时输出的提示行（Details 没有提示行）
    pub fn empty_notice(self) -> Option<&'static str> {
        match self {
            Section::Details => None,
            Section::Notes => Some("No Work Item Notes available."),
            Section::Attachments => Some("No Work Item Attachments available."),
            Section::AuditHistory => Some("No Work Item Audit History available."),
        }
    }

    /// 表头（Details 没有表头）
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Section::Details => &[],
            Section::Notes => &["Note Date", "Entered By", "Related Action"],
            Section::Attachments => &["File Name", "Attach Date", "Size (KB)"],
            Section::AuditHistory => &["Date", "Action", "Performed By"],
        }
    }

    /// 命令行中使用的名称
    pub fn key(self) -> &'static str {
        match self {
            Section::Details => "details",
            Section::Notes => "notes",
            Section::Attachments => "attachments",
            Section::AuditHistory => "audit",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "details" | "detail" => Ok(Section::Details),
            "notes" | "note" => Ok(Section::Notes),
            "attachments" | "attachment" => Ok(Section::Attachments),
            "audit" | "audit-history" | "audithistory" => Ok(Section::AuditHistory),
            other => Err(format!("未知的部分: {}", other)),
        }
    }
}

/// 四个复选框的状态，仅在一次导出中有效
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSelection {
    pub details: bool,
    pub notes: bool,
    pub attachments: bool,
    pub audit_history: bool,
}

impl SectionSelection {
    /// 全部勾选
    pub fn all() -> Self {
        Self {
            details: true,
            notes: true,
            attachments: true,
            audit_history: true,
        }
    }

    /// 全部不勾选
    pub fn none() -> Self {
        Self {
            details: false,
            notes: false,
            attachments: false,
            audit_history: false,
        }
    }

    pub fn is_selected(&self, section: Section) -> bool {
        match section {
            Section::Details => self.details,
            Section::Notes => self.notes,
            Section::Attachments => self.attachments,
            Section::AuditHistory => self.audit_history,
        }
    }

    pub fn set(&mut self, section: Section, selected: bool) {
        match section {
            Section::Details => self.details = selected,
            Section::Notes => self.notes = selected,
            Section::Attachments => self.attachments = selected,
            Section::AuditHistory => self.audit_history = selected,
        }
    }

    /// 返回修改了某一项后的副本
    pub fn with(mut self, section: Section, selected: bool) -> Self {
        self.set(section, selected);
        self
    }
}

impl Default for SectionSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for SectionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Section::ALL
            .iter()
            .map(|s| format!("[{}] {}", if self.is_selected(*s) { "x" } else { " " }, s))
            .collect();
        write!(f, "{}", parts.join("  "))
    }
}
