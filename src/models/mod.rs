pub mod loaders;
pub mod selection;
pub mod work_item;

pub use loaders::{load_work_items, DataSource};
pub use selection::{Section, SectionSelection};
pub use work_item::{
    AuditEvent, ItemId, SizeKb, WorkItemAttachment, WorkItemDetails, WorkItemNote, WorkItemRecord,
    PLACEHOLDER,
};
