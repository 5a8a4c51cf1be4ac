pub mod logging;

pub use logging::{log_records_loaded, log_startup, print_shell_help, truncate_text};
