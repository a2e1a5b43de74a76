// Import parsing and shape normalization for uploaded documents

use crate::task::{Field, Task};
use serde_json::Value;
use tracing::{debug, info};

/// The uploaded file is not syntactically valid JSON. The in-memory list
/// stays untouched.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse JSON file: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Parse an uploaded document and extract its task list.
///
/// Returns `Ok(Some(tasks))` when the document carries a `Tasks` array, and
/// `Ok(None)` when it parses but has none: re-uploading an unrelated JSON
/// file must not be destructive, so that case is a silent no-op rather than
/// an error. Only the four known string fields are consulted per element;
/// anything else on the element (including an exported `Settings` block) is
/// dropped. Missing or non-string field values normalize to `""`.
pub fn parse_tasks(contents: &str) -> Result<Option<Vec<Task>>, ParseError> {
    let value: Value = serde_json::from_str(contents)?;

    let Some(entries) = value.get("Tasks").and_then(Value::as_array) else {
        debug!("document has no Tasks array, leaving list unchanged");
        return Ok(None);
    };

    let tasks: Vec<Task> = entries.iter().map(task_from_entry).collect();
    info!(count = tasks.len(), "parsed tasks from import document");
    Ok(Some(tasks))
}

fn task_from_entry(entry: &Value) -> Task {
    let mut task = Task::default();
    for field in Field::ALL {
        if let Some(s) = entry.get(field.key()).and_then(Value::as_str) {
            task.set_field(field, s);
        }
    }
    task
}
