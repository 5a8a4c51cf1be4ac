pub mod export_log;
pub mod pdf_renderer;
pub mod preview;
pub mod record_store;
pub mod report_composer;

pub use export_log::ExportLog;
pub use pdf_renderer::PdfRenderer;
pub use preview::render_preview;
pub use record_store::{find_by_id, WorkItemStore};
pub use report_composer::{LayoutOptions, RenderedDocument, ReportComposer};
