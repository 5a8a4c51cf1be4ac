pub mod json_loader;

pub use json_loader::{load_json_file, load_work_items, parse_work_items, DataSource};
