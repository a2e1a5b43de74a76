// Export document construction and file writing

use crate::task::Task;
use eyre::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Default file name offered for the exported document.
pub const DEFAULT_EXPORT_FILE: &str = "migration-tasks.json";

/// Fixed per-task settings block injected at export time.
///
/// The downstream migration tool requires these keys on every task; they
/// are not user-editable and are never stored on the in-memory `Task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    #[serde(rename = "DefaultPackageFileCount")]
    pub default_package_file_count: u32,
    #[serde(rename = "MigrateSiteSettings")]
    pub migrate_site_settings: u32,
    #[serde(rename = "MigrateRootFolder")]
    pub migrate_root_folder: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_package_file_count: 0,
            migrate_site_settings: 0,
            migrate_root_folder: true,
        }
    }
}

/// One task as it appears in the export file: the four field values
/// verbatim, plus the fixed settings block. Field order is part of the
/// contract.
#[derive(Debug, Clone, Serialize)]
pub struct ExportTask {
    #[serde(rename = "SourcePath")]
    pub source_path: String,
    #[serde(rename = "TargetPath")]
    pub target_path: String,
    #[serde(rename = "TargetList")]
    pub target_list: String,
    #[serde(rename = "TargetListRelativePath")]
    pub target_list_relative_path: String,
    #[serde(rename = "Settings")]
    pub settings: Settings,
}

impl From<&Task> for ExportTask {
    fn from(task: &Task) -> Self {
        Self {
            source_path: task.source_path.clone(),
            target_path: task.target_path.clone(),
            target_list: task.target_list.clone(),
            target_list_relative_path: task.target_list_relative_path.clone(),
            settings: Settings::default(),
        }
    }
}

/// The canonical `{ "Tasks": [...] }` wrapper consumed by the external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    #[serde(rename = "Tasks")]
    pub tasks: Vec<ExportTask>,
}

impl ExportDocument {
    /// Serialize with human-readable indentation; users hand-edit these
    /// files.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize export document")
    }
}

/// One or more tasks have an empty required field. Carries the 0-based
/// indices of the offending tasks; no document is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} task(s) have empty required fields", invalid.len())]
pub struct ValidationError {
    pub invalid: Vec<usize>,
}

/// Build the export document, or fail listing every invalid task.
///
/// Validation is all-or-nothing: a single bad row aborts the whole export
/// and nothing is written. Field values pass through untrimmed.
pub fn build_export_document(tasks: &[Task]) -> Result<ExportDocument, ValidationError> {
    let invalid: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_valid())
        .map(|(i, _)| i)
        .collect();

    if !invalid.is_empty() {
        return Err(ValidationError { invalid });
    }

    Ok(ExportDocument {
        tasks: tasks.iter().map(ExportTask::from).collect(),
    })
}

/// Validate, serialize and write the document to `path` as UTF-8 JSON.
/// The in-memory list is read-only here; any failure leaves it untouched.
pub fn write_export(path: &Path, tasks: &[Task]) -> Result<()> {
    let document = build_export_document(tasks)?;
    let json = document.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write export file {}", path.display()))?;
    info!(path = %path.display(), count = tasks.len(), "wrote export document");
    Ok(())
}
