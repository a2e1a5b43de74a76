// In-memory ordered task list and its mutation operations

use crate::task::{Field, Task};
use tracing::debug;

/// The single in-memory list of tasks for one editing session.
///
/// All mutation is synchronous and single-threaded; the list is owned by
/// whoever drives the session (the CLI loop, a test) and passed explicitly.
/// `revision()` lets a rendering layer detect that the list changed without
/// diffing it: every applied mutation bumps the counter, no-ops do not.
#[derive(Debug, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskList {
    /// A fresh session always starts with exactly one blank task, so there
    /// is always a row to edit.
    pub fn new() -> Self {
        Self {
            tasks: vec![Task::default()],
            revision: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Only reachable through `replace_all` with an empty array; user
    /// actions never drop the list below one row.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append one blank task at the end. Always succeeds.
    pub fn add_task(&mut self) {
        self.tasks.push(Task::default());
        self.revision += 1;
        debug!(len = self.tasks.len(), "added blank task");
    }

    /// Remove the task at `index`. Out-of-range indices are a no-op:
    /// a stale remove event (row already gone) must not hit another row
    /// or crash the session.
    pub fn remove_task(&mut self, index: usize) {
        if index >= self.tasks.len() {
            debug!(index, len = self.tasks.len(), "remove out of range, ignored");
            return;
        }
        self.tasks.remove(index);
        self.revision += 1;
        debug!(index, len = self.tasks.len(), "removed task");
    }

    /// Set one field of the task at `index`, verbatim. No validation here;
    /// emptiness is only checked at export time. Out-of-range is a no-op.
    pub fn update_field(&mut self, index: usize, field: Field, value: &str) {
        let Some(task) = self.tasks.get_mut(index) else {
            debug!(index, %field, "edit out of range, ignored");
            return;
        };
        task.set_field(field, value);
        self.revision += 1;
    }

    /// Replace the whole list in one assignment, preserving order. Used by
    /// import: a loaded snapshot fully discards the previous state, it is
    /// never merged into it.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        debug!(old = self.tasks.len(), new = tasks.len(), "replacing task list");
        self.tasks = tasks;
        self.revision += 1;
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_one_blank_task() {
        let list = TaskList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0], Task::default());
    }

    #[test]
    fn test_add_appends_blank_task() {
        let mut list = TaskList::new();
        list.update_field(0, Field::SourcePath, "s");
        list.add_task();

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].source_path, "s");
        assert_eq!(list.tasks()[1], Task::default());
    }

    #[test]
    fn test_remove_shifts_subsequent_indices() {
        let mut list = TaskList::new();
        list.add_task();
        list.add_task();
        list.update_field(0, Field::SourcePath, "first");
        list.update_field(1, Field::SourcePath, "second");
        list.update_field(2, Field::SourcePath, "third");

        list.remove_task(1);

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].source_path, "first");
        assert_eq!(list.tasks()[1].source_path, "third");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = TaskList::new();
        list.remove_task(5);
        list.remove_task(usize::MAX);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_length_tracks_adds_minus_valid_removes() {
        let mut list = TaskList::new();
        for _ in 0..4 {
            list.add_task();
        }
        list.remove_task(0);
        list.remove_task(3);
        list.remove_task(10); // out of range, ignored
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_update_field_out_of_range_is_noop() {
        let mut list = TaskList::new();
        let before = list.revision();
        list.update_field(3, Field::TargetPath, "x");
        assert_eq!(list.revision(), before);
        assert_eq!(list.tasks()[0], Task::default());
    }

    #[test]
    fn test_update_field_stores_verbatim() {
        let mut list = TaskList::new();
        list.update_field(0, Field::TargetList, "  untrimmed  ");
        assert_eq!(list.tasks()[0].target_list, "  untrimmed  ");
    }

    #[test]
    fn test_replace_all_discards_previous_state() {
        let mut list = TaskList::new();
        list.update_field(0, Field::SourcePath, "old");

        let incoming = vec![
            Task {
                source_path: "a".to_string(),
                ..Task::default()
            },
            Task {
                source_path: "b".to_string(),
                ..Task::default()
            },
        ];
        list.replace_all(incoming);

        assert_eq!(list.len(), 2);
        assert_eq!(list.tasks()[0].source_path, "a");
        assert_eq!(list.tasks()[1].source_path, "b");
    }

    #[test]
    fn test_replace_all_may_empty_the_list() {
        let mut list = TaskList::new();
        list.replace_all(Vec::new());
        assert!(list.is_empty());
    }

    #[test]
    fn test_revision_bumps_on_applied_mutations_only() {
        let mut list = TaskList::new();
        assert_eq!(list.revision(), 0);

        list.add_task();
        assert_eq!(list.revision(), 1);
        list.update_field(1, Field::SourcePath, "s");
        assert_eq!(list.revision(), 2);
        list.remove_task(1);
        assert_eq!(list.revision(), 3);

        // no-ops leave the revision alone
        list.remove_task(9);
        list.update_field(9, Field::SourcePath, "s");
        assert_eq!(list.revision(), 3);

        list.replace_all(Vec::new());
        assert_eq!(list.revision(), 4);
    }
}
