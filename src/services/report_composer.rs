//! 报告排版服务 - 业务能力层
//!
//! 把一条工作项按所选部分排成固定宽度的表格，输出 `RenderedDocument`。
//! 坐标单位为毫米，`y` 为文字基线；单元格边框为 `(x, y - 6, 宽, 10)`。
//!
//! 排版规则：
//! 1. 起点 x = 10, y = 20，列宽 50，行高 10
//! 2. 顺序固定：Details → Notes → Attachments → Audit History
//! 3. 每个部分：标题(14号) → 表头(12号) → 数据行(10号) → 额外空一行
//! 4. 列表为空时只输出一行提示文字，使用当前字号，不额外空行

use crate::models::work_item::{or_placeholder, WorkItemRecord};
use crate::models::{Section, SectionSelection};

/// 左边距
pub const LEFT_MARGIN: f64 = 10.0;
/// 起始 y
pub const TOP_MARGIN: f64 = 20.0;
/// 所有表格共用的列宽
pub const COLUMN_WIDTH: f64 = 50.0;
/// 行高
pub const ROW_HEIGHT: f64 = 10.0;
/// 单元格边框顶部相对基线的偏移
pub const CELL_TOP_OFFSET: f64 = 6.0;

/// A4 页面高度
pub const PAGE_HEIGHT: f64 = 297.0;
/// 分页模式下的底边距
pub const BOTTOM_MARGIN: f64 = 10.0;

/// 初始字号（PDF 默认 16 号）
pub const DEFAULT_FONT_SIZE: u8 = 16;
pub const TITLE_FONT_SIZE: u8 = 14;
pub const HEADER_FONT_SIZE: u8 = 12;
pub const CELL_FONT_SIZE: u8 = 10;

/// 排版选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// 超出页面时是否换页；关闭时所有内容都在第一页，超出部分被裁掉
    pub paginate: bool,
    pub page_height: f64,
    pub bottom_margin: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            paginate: false,
            page_height: PAGE_HEIGHT,
            bottom_margin: BOTTOM_MARGIN,
        }
    }
}

/// 排版元素类型
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// 部分标题
    Title(String),
    /// "No ... available." 提示行
    Notice(String),
    /// 表头单元格
    HeaderCell { text: String, width: f64 },
    /// 数据单元格
    Cell { text: String, width: f64 },
}

/// 一个定位好的排版元素
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutElement {
    pub page: usize,
    pub section: Section,
    pub x: f64,
    pub y: f64,
    pub font_size: u8,
    pub kind: ElementKind,
}

impl LayoutElement {
    pub fn text(&self) -> &str {
        match &self.kind {
            ElementKind::Title(t) | ElementKind::Notice(t) => t,
            ElementKind::HeaderCell { text, .. } | ElementKind::Cell { text, .. } => text,
        }
    }

    /// 带边框元素的矩形 (x, y, 宽, 高)
    pub fn border(&self) -> Option<(f64, f64, f64, f64)> {
        match &self.kind {
            ElementKind::HeaderCell { width, .. } | ElementKind::Cell { width, .. } => {
                Some((self.x, self.y - CELL_TOP_OFFSET, *width, ROW_HEIGHT))
            }
            _ => None,
        }
    }
}

/// 排版结果，生成后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub title: String,
    pub page_count: usize,
    pub elements: Vec<LayoutElement>,
}

impl RenderedDocument {
    /// 某一页上的元素
    pub fn page_elements(&self, page: usize) -> impl Iterator<Item = &LayoutElement> {
        self.elements.iter().filter(move |e| e.page == page)
    }

    /// 某一部分的元素
    pub fn section_elements(&self, section: Section) -> impl Iterator<Item = &LayoutElement> {
        self.elements.iter().filter(move |e| e.section == section)
    }

    /// 所有文字（按输出顺序）
    pub fn texts(&self) -> Vec<&str> {
        self.elements.iter().map(LayoutElement::text).collect()
    }

    /// 最后一个元素的 y（超过页面高度说明内容溢出）
    pub fn max_y(&self) -> f64 {
        self.elements.iter().map(|e| e.y).fold(0.0, f64::max)
    }
}

/// 根据调用方提供的 ItemId 生成文件名
///
/// 路径分隔符替换为 `_`，文件总是落在输出目录内
pub fn document_file_name(item_id: &str) -> String {
    let safe_id: String = item_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("WorkItem_{}.pdf", safe_id)
}

/// 报告排版服务
pub struct ReportComposer {
    options: LayoutOptions,
}

impl ReportComposer {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    /// 排版一条工作项
    ///
    /// # 参数
    /// - `requested_id`: 用户输入的 ItemId（用于文件名）
    /// - `record`: 查找到的工作项
    /// - `selection`: 复选框状态
    pub fn compose(
        &self,
        requested_id: &str,
        record: &WorkItemRecord,
        selection: SectionSelection,
    ) -> RenderedDocument {
        let mut canvas = Canvas::new(self.options);

        for section in Section::ALL {
            if !selection.is_selected(section) {
                continue;
            }
            match section {
                Section::Details => {
                    if let Some(details) = &record.details {
                        let rows: Vec<Vec<String>> = details
                            .fields()
                            .iter()
                            .map(|(label, value)| vec![label.to_string(), or_placeholder(*value)])
                            .collect();
                        canvas.table(section, &rows);
                    }
                }
                Section::Notes => {
                    if let Some(notes) = &record.notes {
                        let rows: Vec<Vec<String>> = notes
                            .iter()
                            .map(|n| {
                                vec![
                                    or_placeholder(n.note_date.as_deref()),
                                    or_placeholder(n.entered_by.as_deref()),
                                    or_placeholder(n.related_action.as_deref()),
                                ]
                            })
                            .collect();
                        canvas.list(section, &rows);
                    }
                }
                Section::Attachments => {
                    if let Some(attachments) = &record.attachments {
                        let rows: Vec<Vec<String>> = attachments
                            .iter()
                            .map(|a| {
                                vec![
                                    or_placeholder(a.file_name.as_deref()),
                                    or_placeholder(a.attach_date.as_deref()),
                                    or_placeholder(
                                        a.size_kb.as_ref().and_then(|s| s.display_text()).as_deref(),
                                    ),
                                ]
                            })
                            .collect();
                        canvas.list(section, &rows);
                    }
                }
                Section::AuditHistory => {
                    if let Some(history) = &record.audit_history {
                        let rows: Vec<Vec<String>> = history
                            .iter()
                            .map(|h| {
                                vec![
                                    or_placeholder(h.date.as_deref()),
                                    or_placeholder(h.action.as_deref()),
                                    or_placeholder(h.performed_by.as_deref()),
                                ]
                            })
                            .collect();
                        canvas.list(section, &rows);
                    }
                }
            }
        }

        RenderedDocument {
            file_name: document_file_name(requested_id),
            title: format!("Work Item {}", requested_id),
            page_count: canvas.page + 1,
            elements: canvas.elements,
        }
    }
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

/// 排版游标，记录当前页、当前 y 和当前字号
struct Canvas {
    options: LayoutOptions,
    x: f64,
    y: f64,
    page: usize,
    font_size: u8,
    elements: Vec<LayoutElement>,
}

impl Canvas {
    fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            x: LEFT_MARGIN,
            y: TOP_MARGIN,
            page: 0,
            font_size: DEFAULT_FONT_SIZE,
            elements: Vec::new(),
        }
    }

    /// 键值表：标题 + 数据行，无表头
    fn table(&mut self, section: Section, rows: &[Vec<String>]) {
        self.title(section);
        for row in rows {
            self.row(section, row);
        }
        self.advance();
    }

    /// 列表：非空时 标题 + 表头 + 数据行，空时一行提示
    fn list(&mut self, section: Section, rows: &[Vec<String>]) {
        if rows.is_empty() {
            if let Some(notice) = section.empty_notice() {
                self.notice(section, notice);
            }
            return;
        }

        self.title(section);
        self.header(section);
        for row in rows {
            self.row(section, row);
        }
        self.advance();
    }

    fn title(&mut self, section: Section) {
        self.font_size = TITLE_FONT_SIZE;
        self.push_line(section, vec![ElementKind::Title(section.title().to_string())]);
    }

    fn notice(&mut self, section: Section, text: &str) {
        self.push_line(section, vec![ElementKind::Notice(text.to_string())]);
    }

    fn header(&mut self, section: Section) {
        self.font_size = HEADER_FONT_SIZE;
        let cells = section
            .headers()
            .iter()
            .map(|h| ElementKind::HeaderCell {
                text: h.to_string(),
                width: COLUMN_WIDTH,
            })
            .collect();
        self.push_line(section, cells);
    }

    fn row(&mut self, section: Section, values: &[String]) {
        self.font_size = CELL_FONT_SIZE;
        let cells = values
            .iter()
            .map(|v| ElementKind::Cell {
                text: v.clone(),
                width: COLUMN_WIDTH,
            })
            .collect();
        self.push_line(section, cells);
    }

    /// 放置一行元素（第 i 个元素位于 x + 列宽 * i），然后下移一行
    fn push_line(&mut self, section: Section, kinds: Vec<ElementKind>) {
        self.break_page_if_needed();
        for (index, kind) in kinds.into_iter().enumerate() {
            self.elements.push(LayoutElement {
                page: self.page,
                section,
                x: self.x + COLUMN_WIDTH * index as f64,
                y: self.y,
                font_size: self.font_size,
                kind,
            });
        }
        self.advance();
    }

    fn advance(&mut self) {
        self.y += ROW_HEIGHT;
    }

    fn break_page_if_needed(&mut self) {
        if !self.options.paginate {
            return;
        }
        let cell_bottom = self.y - CELL_TOP_OFFSET + ROW_HEIGHT;
        if cell_bottom > self.options.page_height - self.options.bottom_margin {
            self.page += 1;
            self.y = TOP_MARGIN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuditEvent, SizeKb, WorkItemAttachment, WorkItemDetails, WorkItemNote};

    fn sample_record() -> WorkItemRecord {
        WorkItemRecord {
            details: Some(WorkItemDetails {
                item_id: Some("A1".into()),
                owner: Some("Jo".into()),
                ..Default::default()
            }),
            notes: Some(vec![]),
            attachments: Some(vec![]),
            audit_history: Some(vec![]),
        }
    }

    fn full_record() -> WorkItemRecord {
        WorkItemRecord {
            details: Some(WorkItemDetails {
                item_id: Some("W-7".into()),
                ..Default::default()
            }),
            notes: Some(vec![WorkItemNote {
                note_date: Some("2024-03-01".into()),
                entered_by: Some("ana".into()),
                related_action: None,
            }]),
            attachments: Some(vec![
                WorkItemAttachment {
                    file_name: Some("scan.pdf".into()),
                    attach_date: Some("2024-03-02".into()),
                    size_kb: Some(SizeKb::Number(120.0)),
                },
                WorkItemAttachment {
                    file_name: Some("empty.txt".into()),
                    attach_date: None,
                    size_kb: Some(SizeKb::Number(0.0)),
                },
            ]),
            audit_history: Some(vec![AuditEvent {
                date: Some("2024-03-03".into()),
                action: Some("Closed".into()),
                performed_by: Some("sys".into()),
            }]),
        }
    }

    #[test]
    fn test_minimal_record_all_sections() {
        let doc = ReportComposer::default().compose("A1", &sample_record(), SectionSelection::all());

        assert_eq!(doc.file_name, "WorkItem_A1.pdf");
        assert_eq!(doc.page_count, 1);

        let details: Vec<_> = doc.section_elements(Section::Details).collect();
        // 标题 + 9 行 * 2 列
        assert_eq!(details.len(), 1 + 18);
        assert_eq!(details[0].text(), "Work Item Details:");
        assert_eq!(details[0].font_size, TITLE_FONT_SIZE);
        assert_eq!((details[0].x, details[0].y), (10.0, 20.0));

        let values: Vec<_> = details[1..].chunks(2).map(|c| (c[0].text(), c[1].text())).collect();
        assert_eq!(values[0], ("ItemId", "A1"));
        assert_eq!(values[4], ("Owner", "Jo"));
        assert_eq!(values.iter().filter(|(_, v)| *v == "N/A").count(), 7);

        // 9 行数据后 y = 20 + 10 + 90 = 120，再空一行
        let notice = doc.section_elements(Section::Notes).next().unwrap();
        assert_eq!(notice.text(), "No Work Item Notes available.");
        assert_eq!(notice.y, 130.0);
        assert_eq!(notice.font_size, CELL_FONT_SIZE);

        let texts = doc.texts();
        let tail = &texts[texts.len() - 3..];
        assert_eq!(
            tail,
            &[
                "No Work Item Notes available.",
                "No Work Item Attachments available.",
                "No Work Item Audit History available.",
            ]
        );
        let last = doc.elements.last().unwrap();
        assert_eq!(last.y, 150.0);
    }

    #[test]
    fn test_cells_are_positioned_by_column() {
        let doc = ReportComposer::default().compose("W-7", &full_record(), SectionSelection::all());

        let notes: Vec<_> = doc.section_elements(Section::Notes).collect();
        assert_eq!(notes[0].text(), "Work Item Notes:");
        assert_eq!(notes[0].y, 130.0);

        let headers: Vec<_> = notes[1..4].iter().map(|e| (e.x, e.y, e.text())).collect();
        assert_eq!(
            headers,
            vec![
                (10.0, 140.0, "Note Date"),
                (60.0, 140.0, "Entered By"),
                (110.0, 140.0, "Related Action"),
            ]
        );
        assert!(notes[1..4].iter().all(|e| e.font_size == HEADER_FONT_SIZE));

        let row: Vec<_> = notes[4..7].iter().map(|e| e.text()).collect();
        assert_eq!(row, vec!["2024-03-01", "ana", "N/A"]);
        assert_eq!(notes[4].border(), Some((10.0, 144.0, 50.0, 10.0)));

        // 备注结束于 150，空一行后附件标题在 170
        let attachments: Vec<_> = doc.section_elements(Section::Attachments).collect();
        assert_eq!(attachments[0].y, 170.0);
        let sizes: Vec<_> = attachments
            .iter()
            .filter(|e| e.x == 110.0 && matches!(e.kind, ElementKind::Cell { .. }))
            .map(|e| e.text())
            .collect();
        assert_eq!(sizes, vec!["120", "N/A"]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = ReportComposer::default();
        let first = composer.compose("W-7", &full_record(), SectionSelection::all());
        let second = composer.compose("W-7", &full_record(), SectionSelection::all());
        assert_eq!(first, second);
    }

    #[test]
    fn test_disabling_section_removes_only_that_section() {
        let composer = ReportComposer::default();
        let all = composer.compose("W-7", &full_record(), SectionSelection::all());
        let without_notes = composer.compose(
            "W-7",
            &full_record(),
            SectionSelection::all().with(Section::Notes, false),
        );

        assert_eq!(without_notes.section_elements(Section::Notes).count(), 0);

        let strip = |doc: &RenderedDocument| -> Vec<String> {
            doc.elements
                .iter()
                .filter(|e| e.section != Section::Notes)
                .map(|e| e.text().to_string())
                .collect()
        };
        assert_eq!(strip(&all), strip(&without_notes));

        // 后续部分整体上移，间距不变
        let first_attachment = |doc: &RenderedDocument| {
            doc.section_elements(Section::Attachments).next().unwrap().y
        };
        let first_audit = |doc: &RenderedDocument| {
            doc.section_elements(Section::AuditHistory).next().unwrap().y
        };
        assert_eq!(
            first_audit(&all) - first_attachment(&all),
            first_audit(&without_notes) - first_attachment(&without_notes)
        );
    }

    #[test]
    fn test_absent_sections_emit_nothing() {
        let record = WorkItemRecord::default();
        let doc = ReportComposer::default().compose("X", &record, SectionSelection::all());
        assert!(doc.elements.is_empty());
        assert_eq!(doc.file_name, "WorkItem_X.pdf");
    }

    #[test]
    fn test_notice_uses_current_font_size() {
        // 没有任何输出时，提示行使用默认字号
        let doc = ReportComposer::default().compose(
            "A1",
            &sample_record(),
            SectionSelection::none().with(Section::Notes, true),
        );
        assert_eq!(doc.elements.len(), 1);
        assert_eq!(doc.elements[0].font_size, DEFAULT_FONT_SIZE);
        assert_eq!(doc.elements[0].y, TOP_MARGIN);
    }

    #[test]
    fn test_file_name_uses_requested_id() {
        let doc = ReportComposer::default().compose("typed-id", &full_record(), SectionSelection::all());
        assert_eq!(doc.file_name, "WorkItem_typed-id.pdf");
    }

    #[test]
    fn test_file_name_replaces_path_separators() {
        assert_eq!(document_file_name("../../etc/x"), "WorkItem_.._.._etc_x.pdf");
        assert_eq!(document_file_name(r"a\b"), "WorkItem_a_b.pdf");
        assert_eq!(document_file_name("WI 7 #1"), "WorkItem_WI 7 #1.pdf");
    }

    fn long_record(notes: usize) -> WorkItemRecord {
        WorkItemRecord {
            notes: Some(
                (0..notes)
                    .map(|i| WorkItemNote {
                        note_date: Some(format!("day {}", i)),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_unpaginated_layout_overflows_single_page() {
        let doc = ReportComposer::default().compose("L", &long_record(40), SectionSelection::all());
        assert_eq!(doc.page_count, 1);
        assert!(doc.elements.iter().all(|e| e.page == 0));
        assert!(doc.max_y() > PAGE_HEIGHT);
    }

    #[test]
    fn test_paginated_layout_breaks_pages() {
        let options = LayoutOptions {
            paginate: true,
            ..Default::default()
        };
        let doc = ReportComposer::new(options).compose("L", &long_record(40), SectionSelection::all());
        assert!(doc.page_count > 1);
        for element in &doc.elements {
            let bottom = element.y - CELL_TOP_OFFSET + ROW_HEIGHT;
            assert!(bottom <= PAGE_HEIGHT - BOTTOM_MARGIN);
        }
        let second_page_first = doc.page_elements(1).next().unwrap();
        assert_eq!(second_page_first.y, TOP_MARGIN);
    }

    #[test]
    fn test_paginated_matches_compatible_when_it_fits() {
        let paged = ReportComposer::new(LayoutOptions {
            paginate: true,
            ..Default::default()
        });
        let plain = ReportComposer::default();
        assert_eq!(
            paged.compose("W-7", &full_record(), SectionSelection::all()),
            plain.compose("W-7", &full_record(), SectionSelection::all())
        );
    }
}
