use crate::errors::AppError;
use crate::kpi::build_kpis;
use crate::models::{
    KpiResponse, NewNote, NewTask, Note, QuoteResponse, Task, TaskFilters, TaskPatch, ThemeBody,
};
use crate::state::AppState;
use crate::storage::{NOTES_KEY, TASKS_KEY, THEME_KEY};
use crate::store;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let kpis = build_kpis(&data.tasks);
    Html(render_index(data.theme, &kpis))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filters): Query<TaskFilters>,
) -> Json<Vec<Task>> {
    let data = state.data.lock().await;
    Json(store::filter_tasks(&data.tasks, &filters))
}

pub async fn add_task(
    State(state): State<AppState>,
    Json(new): Json<NewTask>,
) -> Result<Json<Task>, AppError> {
    let mut data = state.data.lock().await;
    let task = store::add_task(&mut data.tasks, new)?;
    state.storage.set(TASKS_KEY, &data.tasks).await?;
    Ok(Json(task))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<KpiResponse>, AppError> {
    let mut data = state.data.lock().await;
    if store::toggle_done(&mut data.tasks, &id) {
        state.storage.set(TASKS_KEY, &data.tasks).await?;
    }
    Ok(Json(build_kpis(&data.tasks)))
}

pub async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<KpiResponse>, AppError> {
    let mut data = state.data.lock().await;
    if store::edit_task(&mut data.tasks, &id, patch) {
        state.storage.set(TASKS_KEY, &data.tasks).await?;
    }
    Ok(Json(build_kpis(&data.tasks)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<KpiResponse>, AppError> {
    let mut data = state.data.lock().await;
    if store::delete_task(&mut data.tasks, &id) {
        state.storage.set(TASKS_KEY, &data.tasks).await?;
    }
    Ok(Json(build_kpis(&data.tasks)))
}

pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<Note>> {
    let data = state.data.lock().await;
    Json(data.notes.clone())
}

pub async fn add_note(
    State(state): State<AppState>,
    Json(new): Json<NewNote>,
) -> Result<Json<Note>, AppError> {
    let mut data = state.data.lock().await;
    let note = store::add_note(&mut data.notes, new)?;
    state.storage.set(NOTES_KEY, &data.notes).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(), AppError> {
    let mut data = state.data.lock().await;
    if store::delete_note(&mut data.notes, &id) {
        state.storage.set(NOTES_KEY, &data.notes).await?;
    }
    Ok(())
}

pub async fn get_kpis(State(state): State<AppState>) -> Json<KpiResponse> {
    let data = state.data.lock().await;
    Json(build_kpis(&data.tasks))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    let data = state.data.lock().await;
    Json(ThemeBody { theme: data.theme })
}

pub async fn set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    let mut data = state.data.lock().await;
    data.theme = body.theme;
    state.storage.set(THEME_KEY, &data.theme).await?;
    Ok(Json(ThemeBody { theme: data.theme }))
}

pub async fn get_quote(State(state): State<AppState>) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state.quotes.fetch().await?;
    Ok(Json(quote))
}
