use crate::models::{Note, Task, Theme};
use crate::quote::QuoteClient;
use crate::storage::{NOTES_KEY, Storage, TASKS_KEY, THEME_KEY};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Whole-process state: the ordered task and note lists plus the theme,
/// loaded once at startup and mirrored back to storage after every mutation.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub tasks: Vec<Task>,
    pub notes: Vec<Note>,
    pub theme: Theme,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub quotes: QuoteClient,
    pub data: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub async fn load(storage: Storage, quotes: QuoteClient) -> Self {
        let tasks = storage.get(TASKS_KEY, Vec::new()).await;
        let notes = storage.get(NOTES_KEY, Vec::new()).await;
        let theme = storage.get(THEME_KEY, Theme::default()).await;

        Self {
            storage,
            quotes,
            data: Arc::new(Mutex::new(Dashboard {
                tasks,
                notes,
                theme,
            })),
        }
    }
}
