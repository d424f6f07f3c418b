use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single checklist entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: u32,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Local>,
}

/// Top-level tabs of the main window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainTab {
    Todos,
    Projects,
}

/// Sub-views offered for every todo collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Active,
    Completed,
}

impl ListFilter {
    pub fn label(self) -> &'static str {
        match self {
            ListFilter::All => "All",
            ListFilter::Active => "Active",
            ListFilter::Completed => "Completed",
        }
    }
}

/// Colors a project can be tagged with.
pub const PROJECT_COLORS: [&str; 8] = [
    "blue", "red", "green", "yellow", "orange", "purple", "brown", "black",
];

/// Persisted application preferences, stored in `data/settings.json`.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Settings {
    #[serde(default)]
    pub dark_theme: bool,
}
