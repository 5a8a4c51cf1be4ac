//! 预览服务 - 业务能力层
//!
//! 生成弹窗内容的纯文本版本，字段缺失同样显示 `N/A`

use crate::models::work_item::{or_placeholder, WorkItemRecord};
use crate::models::Section;
use std::fmt::Write;

/// 预览列宽
const PREVIEW_COLUMN_WIDTH: usize = 24;

/// 生成预览文本（四个部分全部显示，与复选框无关）
pub fn render_preview(record: &WorkItemRecord) -> String {
    let mut out = String::new();

    if let Some(details) = &record.details {
        push_title(&mut out, Section::Details);
        for (label, value) in details.fields() {
            let _ = writeln!(out, "  {:<18}{}", label, or_placeholder(value));
        }
        out.push('\n');
    }

    if let Some(notes) = &record.notes {
        let rows = notes
            .iter()
            .map(|n| {
                [
                    or_placeholder(n.note_date.as_deref()),
                    or_placeholder(n.entered_by.as_deref()),
                    or_placeholder(n.related_action.as_deref()),
                ]
            })
            .collect::<Vec<_>>();
        push_list(&mut out, Section::Notes, &rows);
    }

    if let Some(attachments) = &record.attachments {
        let rows = attachments
            .iter()
            .map(|a| {
                [
                    or_placeholder(a.file_name.as_deref()),
                    or_placeholder(a.attach_date.as_deref()),
                    or_placeholder(a.size_kb.as_ref().and_then(|s| s.display_text()).as_deref()),
                ]
            })
            .collect::<Vec<_>>();
        push_list(&mut out, Section::Attachments, &rows);
    }

    if let Some(history) = &record.audit_history {
        let rows = history
            .iter()
            .map(|h| {
                [
                    or_placeholder(h.date.as_deref()),
                    or_placeholder(h.action.as_deref()),
                    or_placeholder(h.performed_by.as_deref()),
                ]
            })
            .collect::<Vec<_>>();
        push_list(&mut out, Section::AuditHistory, &rows);
    }

    out
}

fn push_title(out: &mut String, section: Section) {
    let _ = writeln!(out, "{}", section.title());
}

fn push_list(out: &mut String, section: Section, rows: &[[String; 3]]) {
    if rows.is_empty() {
        if let Some(notice) = section.empty_notice() {
            let _ = writeln!(out, "{}\n", notice);
        }
        return;
    }

    push_title(out, section);
    push_row(out, section.headers().iter().map(|h| h.to_string()));
    let _ = writeln!(out, "  {}", "─".repeat(PREVIEW_COLUMN_WIDTH * 3));
    for row in rows {
        push_row(out, row.iter().cloned());
    }
    out.push('\n');
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let line: String = cells
        .map(|c| format!("{:<width$}", truncate(&c), width = PREVIEW_COLUMN_WIDTH))
        .collect();
    let _ = writeln!(out, "  {}", line.trim_end());
}

// 按字符截断，给列间留一个空格
fn truncate(text: &str) -> String {
    let max = PREVIEW_COLUMN_WIDTH - 1;
    if text.chars().count() > max {
        text.chars().take(max - 3).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
