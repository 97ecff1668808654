use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

/// The page's hash fragments map onto this fixed set of views. Unknown
/// fragments fall back to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Tasks,
    Notes,
}

impl Route {
    pub const ALL: [Route; 3] = [Route::Dashboard, Route::Tasks, Route::Notes];

    pub fn from_fragment(fragment: &str) -> Self {
        match fragment.trim_start_matches("#/") {
            "tasks" => Self::Tasks,
            "notes" => Self::Notes,
            _ => Self::Dashboard,
        }
    }

    pub fn fragment(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Tasks => "tasks",
            Self::Notes => "notes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Tasks => "Tasks",
            Self::Notes => "Notes",
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/tasks", get(handlers::list_tasks))
        .route("/api/tasks", post(handlers::add_task))
        .route("/api/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/api/tasks/:id", patch(handlers::edit_task))
        .route("/api/tasks/:id", delete(handlers::delete_task))
        .route("/api/notes", get(handlers::list_notes))
        .route("/api/notes", post(handlers::add_note))
        .route("/api/notes/:id", delete(handlers::delete_note))
        .route("/api/kpis", get(handlers::get_kpis))
        .route("/api/theme", get(handlers::get_theme))
        .route("/api/theme", put(handlers::set_theme))
        .route("/api/quote", get(handlers::get_quote))
        .with_state(state)
}
