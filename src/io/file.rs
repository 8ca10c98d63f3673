use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::model::Timeline;
use crate::validation;

/// Load a timeline from a JSON file.
///
/// Task map keys are normalized to the task's own `id`; rows failing
/// validation are reported but kept.
pub fn load_timeline(path: &Path) -> Result<Timeline> {
    let json = std::fs::read_to_string(path)?;
    let timeline = parse_timeline(&json)?;
    info!(
        path = %path.display(),
        rows = timeline.rows.len(),
        tasks = timeline.tasks.len(),
        "loaded timeline"
    );
    Ok(timeline)
}

/// Parse a timeline from JSON text.
pub fn parse_timeline(json: &str) -> Result<Timeline> {
    let mut timeline: Timeline = serde_json::from_str(json)?;

    let tasks = std::mem::take(&mut timeline.tasks);
    for (key, task) in tasks {
        if key != task.id {
            warn!(key = %key, id = %task.id, "task key does not match its id, using id");
        }
        timeline.insert_task(task);
    }

    for row in &timeline.rows {
        for err in validation::validate_row(row) {
            warn!(row = %row.id, "{}", err);
        }
    }
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimelineError;

    const SAMPLE: &str = r##"{
        "name": "Demo",
        "rows": [{ "id": "r1", "label": "Team", "tasks": ["a", "b"] }],
        "tasks": {
            "a": { "id": "a", "title": "A", "startDate": "2024-01-01", "endDate": "2024-01-05", "rowId": "r1", "progress": 50 },
            "alias": { "id": "b", "title": "B", "startDate": "2024-01-06", "endDate": "2024-01-08", "rowId": "r1", "dependencies": ["a"] }
        },
        "layout": { "rowHeight": 48 }
    }"##;

    #[test]
    fn parses_and_normalizes_keys() {
        let timeline = parse_timeline(SAMPLE).unwrap();
        assert_eq!(timeline.name, "Demo");
        assert_eq!(timeline.tasks.len(), 2);
        assert_eq!(timeline.tasks["b"].dependencies, vec!["a"]);
        assert!(!timeline.tasks.contains_key("alias"));
        assert_eq!(timeline.layout.row_height, 48.0);
        assert_eq!(timeline.layout.task_height, 40.0);
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let timeline = load_timeline(&path).unwrap();
        assert_eq!(timeline.rows[0].tasks, vec!["a", "b"]);
    }

    #[test]
    fn reports_io_and_parse_errors() {
        let missing = load_timeline(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(TimelineError::Io(_))));
        assert!(matches!(parse_timeline("{ nope"), Err(TimelineError::Json(_))));
    }
}
