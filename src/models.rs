use serde::{Deserialize, Serialize};

/// Closed priority scale. Unknown values are rejected at deserialization,
/// so a task can never carry a priority outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Wire name, matching the serde representation.
    pub fn value(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`, or empty when the task has no due date.
    #[serde(default)]
    pub date: String,
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    pub done: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub date: String,
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
}

/// Partial edit: an absent field keeps the task's existing value.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Done,
    Pending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::High => priority == Priority::High,
            Self::Medium => priority == Priority::Medium,
            Self::Low => priority == Priority::Low,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskFilters {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub priority: PriorityFilter,
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KpiResponse {
    pub today: usize,
    pub done: usize,
    pub active: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub content: String,
    pub author: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}
