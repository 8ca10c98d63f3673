use serde::{Deserialize, Serialize};

/// A resource lane of the timeline.
///
/// `tasks` is a secondary index over `Task::row_id`; `Timeline::apply_update`
/// keeps the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Row {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            avatar: None,
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, ids: &[&str]) -> Self {
        self.tasks = ids.iter().map(|s| s.to_string()).collect();
        self
    }
}
