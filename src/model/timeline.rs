use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::Color32;
use serde::{Deserialize, Serialize};

use super::config::LayoutConfig;
use super::row::Row;
use super::task::Task;
use crate::validation::{self, ValidationError};

/// Task id to task. Sorted so that whole-map scans come out in id order.
pub type TaskMap = BTreeMap<String, Task>;

pub const DEFAULT_TASK_COLORS: [Color32; 8] = [
    Color32::from_rgb(0x3b, 0x82, 0xf6), // blue
    Color32::from_rgb(0x8b, 0x5c, 0xf6), // purple
    Color32::from_rgb(0x10, 0xb9, 0x81), // green
    Color32::from_rgb(0xf5, 0x9e, 0x0b), // amber
    Color32::from_rgb(0xef, 0x44, 0x44), // red
    Color32::from_rgb(0x06, 0xb6, 0xd4), // cyan
    Color32::from_rgb(0xec, 0x48, 0x99), // pink
    Color32::from_rgb(0x84, 0xcc, 0x16), // lime
];

/// Rows, tasks and layout settings the host hands to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub tasks: TaskMap,
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_name() -> String {
    "Untitled Timeline".to_string()
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Insert a task keyed by its own id, replacing any previous one.
    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    /// The tasks a row lists, sorted by start. Ids with no task are dropped.
    pub fn row_tasks(&self, row: &Row) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = row.tasks.iter().filter_map(|id| self.tasks.get(id)).collect();
        tasks.sort_by_key(|t| t.start);
        tasks
    }

    /// Earliest start and latest end over all tasks.
    pub fn date_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.tasks.values().map(|t| t.start).min()?;
        let end = self.tasks.values().map(|t| t.end).max()?;
        Some((start, end))
    }

    /// Tasks that fail validation, with their errors.
    pub fn invalid_tasks(&self) -> Vec<(String, Vec<ValidationError>)> {
        self.tasks
            .values()
            .filter_map(|task| {
                let errors = validation::validate_task(task);
                (!errors.is_empty()).then(|| (task.id.clone(), errors))
            })
            .collect()
    }

    /// Drop every task that fails validation.
    pub fn without_invalid_tasks(mut self) -> Self {
        self.tasks
            .retain(|_, task| validation::validate_task(task).is_empty());
        self
    }

    /// Insert or replace a task after validating it.
    ///
    /// Row task lists follow the task's `row_id`: the id is dropped from any
    /// other row and appended to its own row if missing.
    pub fn apply_update(&mut self, task: Task) -> Result<(), Vec<ValidationError>> {
        let errors = validation::validate_task(&task);
        if !errors.is_empty() {
            return Err(errors);
        }
        for row in &mut self.rows {
            if row.id == task.row_id {
                if !row.tasks.contains(&task.id) {
                    row.tasks.push(task.id.clone());
                }
            } else {
                row.tasks.retain(|id| *id != task.id);
            }
        }
        self.insert_task(task);
        Ok(())
    }

    /// A fresh five-day task on `row_id` starting `today`, with a generated id
    /// and the next palette colour. `None` when the row does not exist.
    /// Nothing is inserted until the draft goes through [`Timeline::apply_update`].
    pub fn draft_task(&self, row_id: &str, today: NaiveDate) -> Option<Task> {
        self.row_index(row_id)?;
        let mut task = Task::new(
            Task::generate_id(),
            "New Task",
            today,
            today + Duration::days(5),
            row_id,
        );
        task.color = Some(DEFAULT_TASK_COLORS[self.tasks.len() % DEFAULT_TASK_COLORS.len()]);
        Some(task)
    }

    /// A small demo data set laid out around `today`.
    pub fn sample(today: NaiveDate) -> Self {
        let day = |offset: i64| today + Duration::days(offset);
        let mut timeline = Timeline::new("Website Relaunch");

        let mut kickoff = Task::new("kickoff", "Project Kickoff", day(-10), day(-7), "pm")
            .with_progress(100);
        kickoff.color = Some(DEFAULT_TASK_COLORS[0]);
        kickoff.assignee = Some("Alex Morgan".to_string());

        let mut requirements =
            Task::new("requirements", "Requirements", day(-7), day(2), "pm")
                .depends_on(&["kickoff"])
                .with_progress(70);
        requirements.color = Some(DEFAULT_TASK_COLORS[1]);
        requirements.description = Some("Interview stakeholders and collect scope.".to_string());

        let mut design = Task::new("design", "UI Design", day(2), day(14), "design")
            .depends_on(&["requirements"])
            .with_progress(20);
        design.color = Some(DEFAULT_TASK_COLORS[6]);
        design.assignee = Some("Sam Lee".to_string());

        let mut backend = Task::new("backend", "Backend API", day(3), day(24), "dev")
            .depends_on(&["requirements"]);
        backend.color = Some(DEFAULT_TASK_COLORS[2]);

        let mut frontend = Task::new("frontend", "Frontend", day(14), day(30), "dev")
            .depends_on(&["design", "backend"]);
        frontend.color = Some(DEFAULT_TASK_COLORS[5]);

        let mut qa = Task::new("qa", "Testing & QA", day(26), day(36), "qa")
            .depends_on(&["frontend"]);
        qa.color = Some(DEFAULT_TASK_COLORS[4]);

        let mut launch = Task::new_milestone("launch", "Launch", day(38), "pm")
            .depends_on(&["qa"]);
        launch.color = Some(DEFAULT_TASK_COLORS[3]);

        timeline.rows = vec![
            Row::new("pm", "Project Management").with_tasks(&["kickoff", "requirements", "launch"]),
            Row::new("design", "Design Team").with_tasks(&["design"]),
            Row::new("dev", "Engineering").with_tasks(&["backend", "frontend"]),
            Row::new("qa", "Quality Assurance").with_tasks(&["qa"]),
        ];
        for task in [kickoff, requirements, design, backend, frontend, qa, launch] {
            timeline.insert_task(task);
        }
        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    #[test]
    fn sample_is_valid_and_consistent() {
        let timeline = Timeline::sample(today());
        assert!(timeline.invalid_tasks().is_empty());
        for row in &timeline.rows {
            for id in &row.tasks {
                assert_eq!(timeline.tasks[id].row_id, row.id);
            }
        }
    }

    #[test]
    fn row_tasks_sorted_and_skip_missing() {
        let mut timeline = Timeline::sample(today());
        timeline.rows[0].tasks.insert(0, "ghost".to_string());
        timeline.rows[0].tasks.reverse();
        let ids: Vec<&str> = timeline
            .row_tasks(&timeline.rows[0])
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["kickoff", "requirements", "launch"]);
    }

    #[test]
    fn apply_update_rejects_bad_dates() {
        let mut timeline = Timeline::sample(today());
        let mut task = timeline.tasks["design"].clone();
        std::mem::swap(&mut task.start, &mut task.end);
        let errors = timeline.apply_update(task).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidDateRange { .. }));
        assert!(timeline.tasks["design"].start < timeline.tasks["design"].end);
    }

    #[test]
    fn drafted_task_is_added_to_its_row_on_save() {
        let mut timeline = Timeline::sample(today());
        assert!(timeline.draft_task("nowhere", today()).is_none());

        let draft = timeline.draft_task("qa", today()).unwrap();
        assert!(validation::validate_task(&draft).is_empty());
        assert!(!timeline.tasks.contains_key(&draft.id));
        assert_eq!(draft.color, Some(DEFAULT_TASK_COLORS[7]));

        let id = draft.id.clone();
        timeline.apply_update(draft).unwrap();
        assert_eq!(timeline.rows[3].tasks.last(), Some(&id));
        assert_eq!(timeline.tasks[&id].end.date(), today() + Duration::days(5));
        assert_ne!(timeline.draft_task("qa", today()).unwrap().id, id);
    }

    #[test]
    fn apply_update_moves_tasks_between_rows() {
        let mut timeline = Timeline::sample(today());
        let mut qa = timeline.tasks["qa"].clone();
        qa.row_id = "dev".to_string();
        timeline.apply_update(qa).unwrap();
        assert!(timeline.rows[3].tasks.is_empty());
        assert_eq!(timeline.rows[2].tasks, vec!["backend", "frontend", "qa"]);
        // Saving again does not duplicate the entry.
        let qa = timeline.tasks["qa"].clone();
        timeline.apply_update(qa).unwrap();
        assert_eq!(timeline.rows[2].tasks.len(), 3);
    }

    #[test]
    fn without_invalid_tasks_drops_only_bad_records() {
        let mut timeline = Timeline::sample(today());
        timeline.tasks.get_mut("qa").unwrap().progress = 150;
        let cleaned = timeline.without_invalid_tasks();
        assert!(!cleaned.tasks.contains_key("qa"));
        assert_eq!(cleaned.tasks.len(), 6);
    }

    #[test]
    fn date_span_covers_all_tasks() {
        let timeline = Timeline::sample(today());
        let (start, end) = timeline.date_span().unwrap();
        assert_eq!(start.date(), today() - Duration::days(10));
        assert_eq!(end.date(), today() + Duration::days(38));
        assert!(Timeline::new("empty").date_span().is_none());
    }
}
