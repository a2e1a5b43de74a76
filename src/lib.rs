// migtasks - Interactive builder for migration task JSON documents

pub mod export;
pub mod import;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use export::{build_export_document, write_export, ExportDocument, Settings, ValidationError, DEFAULT_EXPORT_FILE};
pub use import::{parse_tasks, ParseError};
pub use store::TaskList;
pub use task::{Field, Task};
