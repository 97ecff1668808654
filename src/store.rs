use crate::errors::AppError;
use crate::models::{NewNote, NewTask, Note, StatusFilter, Task, TaskFilters, TaskPatch};
use chrono::Utc;
use uuid::Uuid;

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn add_task(tasks: &mut Vec<Task>, new: NewTask) -> Result<Task, AppError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let task = Task {
        id: new_id(),
        title,
        date: new.date,
        priority: new.priority,
        description: new.description.trim().to_string(),
        done: false,
        created_at: now_millis(),
    };
    tasks.push(task.clone());
    Ok(task)
}

/// Flips `done` on the matching task. Unknown ids are a no-op.
pub fn toggle_done(tasks: &mut [Task], id: &str) -> bool {
    match tasks.iter_mut().find(|task| task.id == id) {
        Some(task) => {
            task.done = !task.done;
            true
        }
        None => false,
    }
}

/// Applies a partial edit. Absent fields, and a title that trims to
/// nothing, keep the existing value. Never touches id, created_at, or done.
pub fn edit_task(tasks: &mut [Task], id: &str, patch: TaskPatch) -> bool {
    let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
        return false;
    };

    if let Some(title) = patch.title {
        let title = title.trim();
        if !title.is_empty() {
            task.title = title.to_string();
        }
    }
    if let Some(date) = patch.date {
        task.date = date;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(description) = patch.description {
        task.description = description.trim().to_string();
    }
    true
}

pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|task| task.id != id);
    tasks.len() != before
}

/// Status AND priority AND case-insensitive substring match over title or
/// description, in the list's original order. Never mutates the store.
pub fn filter_tasks(tasks: &[Task], filters: &TaskFilters) -> Vec<Task> {
    let query = filters.q.trim().to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            let status_ok = match filters.status {
                StatusFilter::All => true,
                StatusFilter::Done => task.done,
                StatusFilter::Pending => !task.done,
            };
            let priority_ok = filters.priority.matches(task.priority);
            let query_ok = query.is_empty()
                || task.title.to_lowercase().contains(&query)
                || task.description.to_lowercase().contains(&query);
            status_ok && priority_ok && query_ok
        })
        .cloned()
        .collect()
}

pub fn add_note(notes: &mut Vec<Note>, new: NewNote) -> Result<Note, AppError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let note = Note {
        id: new_id(),
        title,
        body: new.body.trim().to_string(),
        created_at: now_millis(),
    };
    notes.push(note.clone());
    Ok(note)
}

pub fn delete_note(notes: &mut Vec<Note>, id: &str) -> bool {
    let before = notes.len();
    notes.retain(|note| note.id != id);
    notes.len() != before
}
