use chrono::NaiveDate;

use crate::model::task::Priority;

/// Staged fields for the next subtask to be added from the detail view.
///
/// Mirrors the add-subtask form: the caller fills fields in as the user
/// types, and the store consumes and resets the whole draft on a
/// successful add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub time: String,
    pub priority: Priority,
    pub reminder: Option<String>,
    pub labels: Vec<String>,
    pub repeat: String,
}

impl SubtaskDraft {
    /// Restore every staged field to its default.
    ///
    /// title/description/time/repeat → empty, due date/reminder → absent,
    /// labels → empty, priority → Priority 3.
    pub fn reset(&mut self) {
        *self = SubtaskDraft::default();
    }

    /// Replace the staged labels from a comma-separated input string.
    /// Entries are trimmed; empty entries are dropped.
    pub fn set_labels_from_input(&mut self, input: &str) {
        self.labels = parse_labels(input);
    }
}

/// Split a comma-separated label string into trimmed, non-empty names,
/// preserving input order.
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
