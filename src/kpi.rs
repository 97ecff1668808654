use crate::models::{KpiResponse, Task};
use chrono::{Local, NaiveDate};

pub fn build_kpis(tasks: &[Task]) -> KpiResponse {
    build_kpis_at(Local::now().date_naive(), tasks)
}

pub fn build_kpis_at(today: NaiveDate, tasks: &[Task]) -> KpiResponse {
    let key = today.format("%Y-%m-%d").to_string();
    let done = tasks.iter().filter(|task| task.done).count();

    KpiResponse {
        today: tasks.iter().filter(|task| task.date == key).count(),
        done,
        active: tasks.len() - done,
    }
}
