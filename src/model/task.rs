use serde::{Deserialize, Serialize};

/// Task priority, a closed six-level scale.
///
/// Serialized as the display strings (`"Priority 1"` .. `"Priority 6"`) so
/// collections written by earlier versions of the app load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Priority 1")]
    P1,
    #[serde(rename = "Priority 2")]
    P2,
    #[default]
    #[serde(rename = "Priority 3")]
    P3,
    #[serde(rename = "Priority 4")]
    P4,
    #[serde(rename = "Priority 5")]
    P5,
    #[serde(rename = "Priority 6")]
    P6,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::P1 => "Priority 1",
            Priority::P2 => "Priority 2",
            Priority::P3 => "Priority 3",
            Priority::P4 => "Priority 4",
            Priority::P5 => "Priority 5",
            Priority::P6 => "Priority 6",
        }
    }

    /// Parse a level number (1-6) or a full label ("Priority 4").
    pub fn parse(s: &str) -> Option<Priority> {
        let s = s.trim();
        let level = s.strip_prefix("Priority ").unwrap_or(s);
        match level {
            "1" => Some(Priority::P1),
            "2" => Some(Priority::P2),
            "3" => Some(Priority::P3),
            "4" => Some(Priority::P4),
            "5" => Some(Priority::P5),
            "6" => Some(Priority::P6),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A to-do item nested under exactly one task. Same metadata shape as a
/// task but no further nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// Unique within the owning task's subtask sequence (not globally).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Locale-formatted, immutable after creation.
    #[serde(default)]
    pub creation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::NaiveDate>,
    /// Time of day, free-form "HH:MM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    /// Free-text reminder, e.g. "15 min before".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
}

/// Top-level to-do item with metadata and an owned sequence of subtasks.
///
/// The subtask sequence preserves insertion order; order is the only
/// implicit priority among subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub creation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create a task with the given id and title; everything else defaulted.
    pub fn new(id: String, title: String, creation_date: String) -> Self {
        Task {
            id,
            title,
            completed: false,
            creation_date,
            due_date: None,
            time: None,
            priority: Priority::default(),
            description: String::new(),
            reminder: None,
            labels: None,
            repeat: None,
            is_draft: None,
            subtasks: Vec::new(),
        }
    }
}

/// Generate a subtask id from a millisecond timestamp, unique within the
/// given sequence.
///
/// The timestamp is bumped until it no longer collides, so two subtasks
/// created in the same millisecond still get distinct ids.
pub fn next_subtask_id(existing: &[Subtask], now_millis: i64) -> String {
    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|s| s.id == id) {
            return id;
        }
        candidate += 1;
    }
}
