pub mod export_ctx;
pub mod export_flow;
pub mod session;

pub use export_ctx::ExportCtx;
pub use export_flow::ExportFlow;
pub use session::ViewerSession;
