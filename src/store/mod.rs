//! The detail-view session: a working copy of one task's subtask
//! sequence, mutated in place and pushed back to the durable collection
//! after every change.

use chrono::{Local, NaiveDate};

use crate::io::{PersistenceSync, SyncOutcome, TaskRepository};
use crate::model::{Priority, Subtask, SubtaskDraft, Task, next_subtask_id};

/// Result of a store operation.
///
/// Invalid targets and empty submits are deliberately silent (the id
/// always comes from the rendered sequence, and an accidental empty
/// submit should not nag), but callers that want to detect the no-op can
/// check for `Skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// The working copy changed; durability reported by the outcome.
    Applied(SyncOutcome),
    /// Nothing matched (or the draft title was blank); state unchanged.
    Skipped,
}

impl ApplyResult {
    pub fn is_applied(self) -> bool {
        matches!(self, ApplyResult::Applied(_))
    }
}

/// Field-level update for one subtask. `None` leaves a field unchanged;
/// for fields that may be absent, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub description: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
    pub time: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub reminder: Option<Option<String>>,
    pub labels: Option<Option<Vec<String>>>,
    pub repeat: Option<Option<String>>,
}

impl SubtaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == SubtaskPatch::default()
    }

    fn apply(&self, subtask: &mut Subtask) {
        if let Some(title) = &self.title {
            subtask.title = title.clone();
        }
        if let Some(completed) = self.completed {
            subtask.completed = completed;
        }
        if let Some(description) = &self.description {
            subtask.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            subtask.due_date = due_date;
        }
        if let Some(time) = &self.time {
            subtask.time = time.clone();
        }
        if let Some(priority) = self.priority {
            subtask.priority = priority;
        }
        if let Some(reminder) = &self.reminder {
            subtask.reminder = reminder.clone();
        }
        if let Some(labels) = &self.labels {
            subtask.labels = labels.clone();
        }
        if let Some(repeat) = &self.repeat {
            subtask.repeat = repeat.clone();
        }
    }
}

/// Callback invoked with the full updated task after every mutation; the
/// rendering side decides what to do with it.
pub type UpdateListener<'a> = Box<dyn FnMut(&Task) + 'a>;

/// Owns the working copy of a single task for the duration of a
/// detail-view session.
///
/// Every mutating operation runs one synchronous epilogue: notify the
/// update listener with the new task snapshot, then reconcile that
/// snapshot into the durable collection. The three steps (mutate, notify,
/// reconcile) complete in the same turn — callers never observe one
/// without the others.
pub struct SubtaskStore<'a, R: TaskRepository> {
    task: Option<Task>,
    draft: SubtaskDraft,
    sync: PersistenceSync<R>,
    listener: Option<UpdateListener<'a>>,
}

impl<'a, R: TaskRepository> SubtaskStore<'a, R> {
    pub fn new(repo: R) -> Self {
        SubtaskStore {
            task: None,
            draft: SubtaskDraft::default(),
            sync: PersistenceSync::new(repo),
            listener: None,
        }
    }

    /// Register the rendering/update-propagation callback.
    pub fn on_update(&mut self, listener: impl FnMut(&Task) + 'a) {
        self.listener = Some(Box::new(listener));
    }

    /// Seed the session from the given task. Fully replaces any previous
    /// working state, including the staged draft — nothing leaks between
    /// tasks.
    pub fn open(&mut self, task: Task) {
        self.task = Some(task);
        self.draft.reset();
    }

    /// Close the session. Subsequent operations are skipped no-ops.
    pub fn close(&mut self) {
        self.task = None;
        self.draft.reset();
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn subtasks(&self) -> &[Subtask] {
        self.task.as_ref().map(|t| t.subtasks.as_slice()).unwrap_or(&[])
    }

    pub fn draft(&self) -> &SubtaskDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SubtaskDraft {
        &mut self.draft
    }

    pub fn sync(&self) -> &PersistenceSync<R> {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut PersistenceSync<R> {
        &mut self.sync
    }

    /// Build a subtask from the staged draft and append it.
    ///
    /// A whitespace-only title skips the add entirely (tolerates
    /// accidental empty submits). On success the draft is reset to its
    /// defaults.
    pub fn add_subtask(&mut self) -> ApplyResult {
        let Some(task) = &mut self.task else {
            return ApplyResult::Skipped;
        };
        let title = self.draft.title.trim();
        if title.is_empty() {
            return ApplyResult::Skipped;
        }

        let now = Local::now();
        let subtask = Subtask {
            id: next_subtask_id(&task.subtasks, now.timestamp_millis()),
            title: title.to_string(),
            completed: false,
            creation_date: now.format("%-m/%-d/%Y").to_string(),
            due_date: self.draft.due_date,
            time: none_if_empty(&self.draft.time),
            priority: self.draft.priority,
            description: self.draft.description.trim().to_string(),
            reminder: self.draft.reminder.clone(),
            labels: if self.draft.labels.is_empty() {
                None
            } else {
                Some(self.draft.labels.clone())
            },
            repeat: none_if_empty(&self.draft.repeat),
        };
        task.subtasks.push(subtask);
        self.draft.reset();
        Self::notify_and_sync(&mut self.sync, &mut self.listener, task)
    }

    /// Flip the completed flag of the matching subtask.
    pub fn toggle_subtask(&mut self, id: &str) -> ApplyResult {
        let Some(task) = &mut self.task else {
            return ApplyResult::Skipped;
        };
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == id) else {
            return ApplyResult::Skipped;
        };
        subtask.completed = !subtask.completed;
        Self::notify_and_sync(&mut self.sync, &mut self.listener, task)
    }

    /// Remove the matching subtask, preserving the order of the rest.
    pub fn delete_subtask(&mut self, id: &str) -> ApplyResult {
        let Some(task) = &mut self.task else {
            return ApplyResult::Skipped;
        };
        let before = task.subtasks.len();
        task.subtasks.retain(|s| s.id != id);
        if task.subtasks.len() == before {
            return ApplyResult::Skipped;
        }
        Self::notify_and_sync(&mut self.sync, &mut self.listener, task)
    }

    /// Merge the patch into the matching subtask; untouched fields keep
    /// their prior values.
    pub fn update_subtask(&mut self, id: &str, patch: &SubtaskPatch) -> ApplyResult {
        let Some(task) = &mut self.task else {
            return ApplyResult::Skipped;
        };
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == id) else {
            return ApplyResult::Skipped;
        };
        patch.apply(subtask);
        Self::notify_and_sync(&mut self.sync, &mut self.listener, task)
    }

    /// Mutation epilogue: push the new snapshot to the listener, then
    /// reconcile it into the durable collection.
    fn notify_and_sync(
        sync: &mut PersistenceSync<R>,
        listener: &mut Option<UpdateListener<'a>>,
        task: &Task,
    ) -> ApplyResult {
        if let Some(listener) = listener {
            listener(task);
        }
        ApplyResult::Applied(sync.reconcile(task))
    }
}

fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
