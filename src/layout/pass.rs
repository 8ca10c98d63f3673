use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::clock::Clock;
use super::lines::{dependency_line, DependencyLine};
use super::position::{point_in_box, position, task_box, TaskPosition};
use super::scale::scale_labels;
use crate::model::task::midnight;
use crate::model::{LayoutConfig, Timeline, TimelineViewport};

/// A header tick placed on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderTick {
    pub x: f32,
    pub date: NaiveDateTime,
    pub label: String,
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct TimelineLayout {
    pub positions: BTreeMap<String, TaskPosition>,
    /// Placed task ids ordered by row, then start.
    pub order: Vec<String>,
    pub lines: Vec<DependencyLine>,
    pub ticks: Vec<HeaderTick>,
    pub total_width: f32,
    pub total_height: f32,
    /// Offset of today's column, when today is inside the viewport.
    pub today_x: Option<f32>,
}

impl TimelineLayout {
    /// The first task, in row order, whose box contains the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&str> {
        self.order
            .iter()
            .find(|id| {
                self.positions
                    .get(id.as_str())
                    .is_some_and(|pos| point_in_box(x, y, &pos.bounds()))
            })
            .map(String::as_str)
    }

    pub fn lines_for<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a DependencyLine> {
        self.lines.iter().filter(move |l| l.involves(task_id))
    }
}

/// One layout pass over a timeline snapshot.
pub struct LayoutPass<'a> {
    viewport: &'a TimelineViewport,
    config: &'a LayoutConfig,
    clock: Option<&'a dyn Clock>,
}

impl<'a> LayoutPass<'a> {
    pub fn new(viewport: &'a TimelineViewport, config: &'a LayoutConfig) -> Self {
        Self {
            viewport,
            config,
            clock: None,
        }
    }

    pub fn with_clock(mut self, clock: &'a dyn Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn run(&self, timeline: &Timeline) -> TimelineLayout {
        let ppd = self.viewport.pixels_per_day();
        let view_start = self.viewport.start;
        let cfg = self.config;

        let row_index: HashMap<&str, usize> = timeline
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();

        let mut positions = BTreeMap::new();
        let mut placed: Vec<(usize, NaiveDateTime, &str)> = Vec::with_capacity(timeline.tasks.len());
        for task in timeline.tasks.values() {
            let Some(&row) = row_index.get(task.row_id.as_str()) else {
                debug!(task = %task.id, row = %task.row_id, "task row not found, not placed");
                continue;
            };
            let bar = task_box(task.start, task.end, view_start, ppd, cfg.min_task_width);
            let bar_top = cfg.row_top(row) + cfg.task_padding;
            let pos = if task.is_milestone {
                let top = bar_top + (cfg.task_height - cfg.milestone_height) / 2.0;
                TaskPosition::from_box(bar, top, cfg.milestone_height)
            } else {
                TaskPosition::from_box(bar, bar_top, cfg.task_height)
            };
            positions.insert(task.id.clone(), pos);
            placed.push((row, task.start, task.id.as_str()));
        }
        placed.sort();

        let mut lines = Vec::new();
        for task in timeline.tasks.values() {
            let Some(to) = positions.get(&task.id) else {
                continue;
            };
            for dep in &task.dependencies {
                match positions.get(dep) {
                    Some(from) => lines.push(dependency_line(dep, from, &task.id, to)),
                    None => trace!(task = %task.id, dependency = %dep, "dependency not placed"),
                }
            }
        }

        let ticks = scale_labels(view_start, self.viewport.end, self.viewport.mode)
            .into_iter()
            .map(|t| HeaderTick {
                x: position(t.date, view_start, ppd),
                date: t.date,
                label: t.label,
            })
            .collect();

        let today_x = self.clock.and_then(|clock| {
            let today = midnight(clock.now().date());
            self.viewport
                .contains(today)
                .then(|| position(today, view_start, ppd))
        });

        TimelineLayout {
            order: placed.into_iter().map(|(_, _, id)| id.to_string()).collect(),
            positions,
            lines,
            ticks,
            total_width: self.viewport.total_width(),
            total_height: timeline.rows.len() as f32 * cfg.row_height,
            today_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::clock::FixedClock;
    use crate::model::{Row, Task, ViewMode};
    use chrono::{Duration, NaiveDate};

    fn d(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    fn fixture() -> (Timeline, TimelineViewport) {
        let mut tl = Timeline::new("t");
        tl.rows = vec![
            Row::new("r1", "One").with_tasks(&["a", "m"]),
            Row::new("r2", "Two").with_tasks(&["b"]),
        ];
        tl.insert_task(Task::new("a", "A", d(0), d(4), "r1"));
        tl.insert_task(Task::new("b", "B", d(5), d(7), "r2").depends_on(&["a", "missing"]));
        tl.insert_task(Task::new_milestone("m", "M", d(8), "r1").depends_on(&["b"]));
        tl.insert_task(Task::new("orphan", "O", d(1), d(2), "nowhere"));
        let vp = TimelineViewport::new(midnight(d(0)), midnight(d(30)), ViewMode::Day);
        (tl, vp)
    }

    #[test]
    fn places_tasks_by_row() {
        let (tl, vp) = fixture();
        let cfg = LayoutConfig::default();
        let layout = LayoutPass::new(&vp, &cfg).run(&tl);

        let a = layout.positions["a"];
        assert_eq!((a.left, a.width, a.top, a.height), (0.0, 160.0, 8.0, 40.0));
        let b = layout.positions["b"];
        assert_eq!((b.left, b.top), (200.0, 68.0));
        let m = layout.positions["m"];
        assert_eq!((m.top, m.height, m.width), (16.0, 24.0, 20.0));
        assert!(!layout.positions.contains_key("orphan"));
        assert_eq!(layout.order, vec!["a", "m", "b"]);
        assert_eq!(layout.total_height, 120.0);
        assert_eq!(layout.total_width, 1200.0);
    }

    #[test]
    fn emits_lines_for_resolvable_dependencies_only() {
        let (tl, vp) = fixture();
        let cfg = LayoutConfig::default();
        let layout = LayoutPass::new(&vp, &cfg).run(&tl);

        assert_eq!(layout.lines.len(), 2);
        let ab = layout
            .lines
            .iter()
            .find(|l| l.to_task_id == "b")
            .unwrap();
        assert_eq!((ab.x1, ab.y1, ab.x2, ab.y2), (160.0, 28.0, 200.0, 88.0));
        let bm = layout.lines.iter().find(|l| l.to_task_id == "m").unwrap();
        assert_eq!(bm.y2, 28.0);
        assert_eq!(layout.lines_for("b").count(), 2);
    }

    #[test]
    fn hit_test_finds_boxes() {
        let (tl, vp) = fixture();
        let cfg = LayoutConfig::default();
        let layout = LayoutPass::new(&vp, &cfg).run(&tl);
        assert_eq!(layout.hit_test(80.0, 20.0), Some("a"));
        assert_eq!(layout.hit_test(210.0, 100.0), Some("b"));
        assert_eq!(layout.hit_test(500.0, 20.0), None);
    }

    #[test]
    fn today_marker_uses_injected_clock() {
        let (tl, vp) = fixture();
        let cfg = LayoutConfig::default();
        let inside = FixedClock(midnight(d(3)) + Duration::hours(15));
        let layout = LayoutPass::new(&vp, &cfg).with_clock(&inside).run(&tl);
        assert_eq!(layout.today_x, Some(120.0));

        let outside = FixedClock(midnight(d(90)));
        let layout = LayoutPass::new(&vp, &cfg).with_clock(&outside).run(&tl);
        assert_eq!(layout.today_x, None);

        let layout = LayoutPass::new(&vp, &cfg).run(&tl);
        assert_eq!(layout.today_x, None);
    }

    #[test]
    fn ticks_are_positioned() {
        let (tl, _) = fixture();
        let vp = TimelineViewport::new(midnight(d(0)), midnight(d(14)), ViewMode::Week);
        let cfg = LayoutConfig::default();
        let layout = LayoutPass::new(&vp, &cfg).run(&tl);
        let xs: Vec<f32> = layout.ticks.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![0.0, 80.0, 160.0]);
        assert_eq!(layout.ticks[1].label, "Jan 08");
    }
}
