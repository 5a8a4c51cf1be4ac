//! PDF 渲染服务 - 业务能力层
//!
//! 把排版好的 `RenderedDocument` 绘制成 PDF 字节，使用 `genpdf`（纯 Rust）。
//! 元素坐标直接对应页面坐标（不加页边装饰）。字体文件嵌入 PDF，非拉丁字符也能显示。

use crate::error::{AppResult, ExportError};
use crate::services::report_composer::{LayoutElement, RenderedDocument};
use genpdf::error::Error as GenPdfError;
use genpdf::fonts::{self, FontData, FontFamily};
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Context, Document, Element, Position, RenderResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 搜索字体的目录
const FONT_DIRS: &[&str] = &[
    "./fonts",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];

/// 字体文件名前缀，按顺序尝试（每个需要 Regular / Bold / Italic / BoldItalic 四个文件）
///
/// 仓库 `fonts/` 下自带 DejaVuSans
const FONT_NAMES: &[&str] = &["LiberationSans", "DejaVuSans"];

/// 点 → 毫米
const PT_TO_MM: f64 = 0.352_778;
/// 上升高度（em 的比例）
const ASCENT_RATIO: f64 = 0.718;

/// PDF 渲染器
pub struct PdfRenderer {
    font_family: FontFamily<FontData>,
}

impl PdfRenderer {
    /// 加载字体并创建渲染器
    ///
    /// `font_dir` 优先于系统目录
    pub fn new(font_dir: Option<&str>) -> AppResult<Self> {
        Self::from_dirs(&font_search_dirs(font_dir))
    }

    fn from_dirs(font_dirs: &[PathBuf]) -> AppResult<Self> {
        let font_family = font_dirs
            .iter()
            .filter(|dir| dir.exists())
            .find_map(|dir| {
                FONT_NAMES.iter().find_map(|name| {
                    // 不使用内置字体：内置字体只支持 Windows-1252
                    let family = fonts::from_files(dir, name, None).ok()?;
                    debug!("🔤 使用字体 {} ({})", name, dir.display());
                    Some(family)
                })
            })
            .ok_or_else(|| ExportError::FontUnavailable {
                searched: font_dirs.iter().map(|d| d.display().to_string()).collect(),
            })?;

        Ok(Self { font_family })
    }

    /// 渲染为 PDF 字节
    pub fn render(&self, document: &RenderedDocument) -> AppResult<Vec<u8>> {
        let mut doc = Document::new(self.font_family.clone());
        doc.set_title(document.title.clone());
        doc.set_minimal_conformance();
        doc.push(CanvasElement::new(document.clone()));

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| ExportError::RenderFailed {
                message: e.to_string(),
            })?;

        debug!(
            "已渲染 {} ({} 页, {} 字节)",
            document.file_name,
            document.page_count,
            buffer.len()
        );
        Ok(buffer)
    }

    /// 渲染并写入 `dir/文件名`
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn save(&self, document: &RenderedDocument, dir: &Path) -> AppResult<PathBuf> {
        let bytes = self.render(document)?;
        let path = dir.join(&document.file_name);

        let write_failed = |e: std::io::Error| ExportError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        };
        tokio::fs::create_dir_all(dir).await.map_err(write_failed)?;
        tokio::fs::write(&path, &bytes).await.map_err(write_failed)?;

        Ok(path)
    }
}

fn font_search_dirs(font_dir: Option<&str>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = FONT_DIRS.iter().map(PathBuf::from).collect();
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        dirs.insert(0, PathBuf::from(manifest_dir).join("fonts"));
    }
    if let Some(dir) = font_dir {
        dirs.insert(0, PathBuf::from(dir));
    }
    dirs
}

/// genpdf 的 `Mm` 只能从 f32 及整数转换
fn mm_position(x: f64, y: f64) -> Position {
    Position::new(x as f32, y as f32)
}

/// 按绝对坐标绘制排版元素，每次调用绘制一页
struct CanvasElement {
    document: RenderedDocument,
    next_page: usize,
}

impl CanvasElement {
    fn new(document: RenderedDocument) -> Self {
        Self {
            document,
            next_page: 0,
        }
    }

    fn draw(&self, context: &Context, area: &Area<'_>, element: &LayoutElement) -> Result<(), GenPdfError> {
        if let Some((x, y, width, height)) = element.border() {
            area.draw_line(
                vec![
                    mm_position(x, y),
                    mm_position(x + width, y),
                    mm_position(x + width, y + height),
                    mm_position(x, y + height),
                    mm_position(x, y),
                ],
                Style::new(),
            );
        }

        // genpdf 以文字左上角定位，排版坐标是基线
        let ascent = f64::from(element.font_size) * PT_TO_MM * ASCENT_RATIO;
        let top = element.y - ascent;
        if top < 0.0 {
            return Ok(());
        }
        let style = Style::new().with_font_size(element.font_size);
        // 超出页面的文字不绘制（print_str 返回 false）
        area.print_str(&context.font_cache, mm_position(element.x, top), style, element.text())?;
        Ok(())
    }
}

impl Element for CanvasElement {
    fn render(
        &mut self,
        context: &Context,
        area: Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, GenPdfError> {
        for element in self.document.page_elements(self.next_page) {
            self.draw(context, &area, element)?;
        }
        self.next_page += 1;

        let mut result = RenderResult::default();
        result.size = area.size();
        result.has_more = self.next_page < self.document.page_count;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectionSelection, WorkItemDetails, WorkItemNote, WorkItemRecord};
    use crate::services::report_composer::{LayoutOptions, ReportComposer};

    /// 仓库自带的字体目录
    const BUNDLED_FONTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts");

    fn renderer() -> PdfRenderer {
        PdfRenderer::new(Some(BUNDLED_FONTS)).expect("仓库自带字体加载失败")
    }

    fn record_with_owner(owner: &str) -> WorkItemRecord {
        WorkItemRecord {
            details: Some(WorkItemDetails {
                item_id: Some("A1".into()),
                owner: Some(owner.into()),
                ..Default::default()
            }),
            notes: Some(vec![]),
            attachments: Some(vec![]),
            audit_history: Some(vec![]),
        }
    }

    /// 统计 PDF 中的页对象数
    fn page_objects(bytes: &[u8]) -> usize {
        let text = String::from_utf8_lossy(bytes).replace("/Type /", "/Type/");
        text.matches("/Type/Page").count() - text.matches("/Type/Pages").count()
    }

    #[test]
    fn test_font_dir_is_searched_first() {
        let dirs = font_search_dirs(Some("/opt/my-fonts"));
        assert_eq!(dirs[0], PathBuf::from("/opt/my-fonts"));
        assert!(dirs.contains(&PathBuf::from("/usr/share/fonts/truetype/liberation")));
    }

    #[test]
    fn test_missing_fonts_is_export_error() {
        let empty = tempfile::tempdir().unwrap();
        let result = PdfRenderer::from_dirs(&[empty.path().to_path_buf(), PathBuf::from("/nonexistent/fonts")]);
        match result {
            Err(crate::error::AppError::Export(ExportError::FontUnavailable { searched })) => {
                assert_eq!(searched.len(), 2);
                assert!(searched[1].contains("nonexistent"));
            }
            Err(other) => panic!("错误类型不对: {other}"),
            Ok(_) => panic!("空目录不应该加载出字体"),
        }
    }

    #[test]
    fn test_render_single_page_pdf() {
        let document = ReportComposer::default().compose("A1", &record_with_owner("Jo"), SectionSelection::all());

        let bytes = renderer().render(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_objects(&bytes), 1);
    }

    #[test]
    fn test_render_paginated_pdf_has_every_page() {
        let record = WorkItemRecord {
            notes: Some(
                (0..40)
                    .map(|i| WorkItemNote {
                        note_date: Some(format!("day {}", i)),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        };
        let composer = ReportComposer::new(LayoutOptions {
            paginate: true,
            ..Default::default()
        });
        let document = composer.compose("L", &record, SectionSelection::all());
        assert!(document.page_count > 1);

        let bytes = renderer().render(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(page_objects(&bytes), document.page_count);
    }

    #[test]
    fn test_render_non_latin_values() {
        // 内置 Helvetica 只有 Windows-1252，这些字符需要嵌入字体
        for owner in ["Дмитрий Иванов", "Ελένη", "Łukasz Żółć"] {
            let document =
                ReportComposer::default().compose("A1", &record_with_owner(owner), SectionSelection::all());
            let bytes = renderer().render(&document).unwrap();
            assert!(bytes.starts_with(b"%PDF-"), "渲染 {owner} 失败");
        }
    }

    #[tokio::test]
    async fn test_save_writes_file_into_output_dir() {
        let out = tempfile::tempdir().unwrap();
        let document = ReportComposer::default().compose("a/b", &record_with_owner("Jo"), SectionSelection::all());

        let path = renderer().save(&document, &out.path().join("nested")).await.unwrap();

        assert_eq!(path, out.path().join("nested").join("WorkItem_a_b.pdf"));
        let bytes = tokio::fs::read(&path).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
