use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::model::task::Task;

/// The persisted collection: tasks keyed by id, in insertion order.
///
/// On the wire this is a plain JSON array of task records; the keyed view
/// exists so a single task can be swapped in place without disturbing the
/// others or their order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: IndexMap<String, Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Append a task, keeping the last entry if the id already exists.
    pub fn push(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Swap in `task` for the entry with the same id, preserving its
    /// position. Returns false (collection unchanged) if no entry matches.
    pub fn replace(&mut self, task: &Task) -> bool {
        match self.tasks.get_mut(&task.id) {
            Some(slot) => {
                *slot = task.clone();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut list = TaskList::new();
        for task in iter {
            list.push(task);
        }
        list
    }
}

impl Serialize for TaskList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.tasks.len()))?;
        for task in self.tasks.values() {
            seq.serialize_element(task)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TaskList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tasks = Vec::<Task>::deserialize(deserializer)?;
        Ok(tasks.into_iter().collect())
    }
}
