use crate::cli::theme::{self, LabelPalette};
use crate::model::{Subtask, Task};

/// One-line summary row for a task list.
pub fn task_row(task: &Task, palette: &LabelPalette) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut row = format!("{} {:>6}  {}", checkbox, task.id, task.title);
    if task.completed {
        row = theme::paint(theme::DIM, &row);
    }
    if let Some(due) = task.due_date {
        row.push_str(&format!("  (due {due})"));
    }
    if let Some(labels) = &task.labels {
        for label in labels {
            row.push(' ');
            row.push_str(&theme::paint(palette.color(label), &format!("#{label}")));
        }
    }
    row
}

/// Full detail view: metadata plus the subtask sequence.
pub fn render_task_detail(task: &Task, palette: &LabelPalette) -> String {
    let mut out = String::new();
    out.push_str(&theme::paint(theme::BOLD, &task.title));
    out.push('\n');

    if !task.description.is_empty() {
        out.push_str(&task.description);
        out.push('\n');
    }

    if let Some(due) = task.due_date {
        match &task.time {
            Some(time) => out.push_str(&format!("due:      {due} at {time}\n")),
            None => out.push_str(&format!("due:      {due}\n")),
        }
    }
    let flag = theme::paint(theme::priority_color(task.priority), task.priority.label());
    out.push_str(&format!("priority: {flag}\n"));
    if let Some(reminder) = &task.reminder {
        out.push_str(&format!("reminder: {reminder}\n"));
    }
    if let Some(repeat) = &task.repeat {
        out.push_str(&format!("repeats:  {}\n", repeat.replace('-', " ")));
    }
    if !task.creation_date.is_empty() {
        out.push_str(&format!("created:  {}\n", task.creation_date));
    }
    if let Some(labels) = &task.labels
        && !labels.is_empty()
    {
        let painted: Vec<String> = labels
            .iter()
            .map(|l| theme::paint(palette.color(l), &format!("#{l}")))
            .collect();
        out.push_str(&format!("labels:   {}\n", painted.join(" ")));
    }

    if !task.subtasks.is_empty() {
        out.push_str("\nsubtasks:\n");
        for subtask in &task.subtasks {
            out.push_str(&subtask_line(subtask, palette));
            out.push('\n');
        }
    }
    out
}

fn subtask_line(subtask: &Subtask, palette: &LabelPalette) -> String {
    let checkbox = if subtask.completed { "[x]" } else { "[ ]" };
    let title = if subtask.completed {
        theme::paint(theme::STRIKE, &subtask.title)
    } else {
        subtask.title.clone()
    };
    let mut line = format!("  {} {}  {}", checkbox, subtask.id, title);
    if let Some(due) = subtask.due_date {
        line.push_str(&format!("  (due {due})"));
    }
    if let Some(labels) = &subtask.labels {
        for label in labels {
            line.push(' ');
            line.push_str(&theme::paint(palette.color(label), &format!("#{label}")));
        }
    }
    line
}
