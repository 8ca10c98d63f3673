//! Date to pixel conversion and task bounding boxes.
//!
//! Offsets are measured in pixels from the view start and rounded to whole
//! pixels. Nothing here validates its input: a task whose end precedes its
//! start simply gets the minimum width.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Horizontal extent of a task bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskBox {
    pub left: f32,
    pub width: f32,
}

/// Full rectangle of a placed task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskPosition {
    pub left: f32,
    pub width: f32,
    pub top: f32,
    pub height: f32,
}

/// An axis-aligned rectangle used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TaskPosition {
    pub fn from_box(task_box: TaskBox, top: f32, height: f32) -> Self {
        Self {
            left: task_box.left,
            width: task_box.width,
            top,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }
}

fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}

/// Pixel offset of `date` from `view_start`. Negative left of the view.
pub fn position(date: NaiveDateTime, view_start: NaiveDateTime, pixels_per_day: f32) -> f32 {
    (days_between(view_start, date) * pixels_per_day as f64).round() as f32
}

/// Width in pixels of the span from `start` to `end`.
pub fn duration(start: NaiveDateTime, end: NaiveDateTime, pixels_per_day: f32) -> f32 {
    (days_between(start, end) * pixels_per_day as f64).round() as f32
}

/// Inverse of [`position`], snapped to whole days from `view_start`.
///
/// Both directions round independently, so this is only an exact inverse
/// for day-aligned dates at an integral `pixels_per_day`. Offsets past the
/// representable range saturate at `NaiveDateTime::MIN`/`MAX`.
pub fn date_from_position(
    offset: f32,
    view_start: NaiveDateTime,
    pixels_per_day: f32,
) -> NaiveDateTime {
    let days = (offset as f64 / pixels_per_day as f64).round() as i64;
    Duration::try_days(days)
        .and_then(|d| view_start.checked_add_signed(d))
        .unwrap_or(if days < 0 {
            NaiveDateTime::MIN
        } else {
            NaiveDateTime::MAX
        })
}

/// Bar extent for a task.
///
/// `left` is clamped to zero, so a task that starts before the view is drawn
/// from the left edge and its visible start no longer matches its real one.
/// `width` never drops below `min_width`.
pub fn task_box(
    task_start: NaiveDateTime,
    task_end: NaiveDateTime,
    view_start: NaiveDateTime,
    pixels_per_day: f32,
    min_width: f32,
) -> TaskBox {
    let left = position(task_start, view_start, pixels_per_day);
    let width = duration(task_start, task_end, pixels_per_day).max(min_width);
    TaskBox {
        left: left.max(0.0),
        width,
    }
}

/// Clamp `value` into `[min, max]`. When `min > max`, `max` wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Inclusive on all four edges.
pub fn point_in_box(x: f32, y: f32, bounds: &Bounds) -> bool {
    x >= bounds.left
        && x <= bounds.left + bounds.width
        && y >= bounds.top
        && y <= bounds.top + bounds.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::midnight;
    use chrono::NaiveDate;

    fn day(n: i64) -> NaiveDateTime {
        midnight(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()) + Duration::days(n)
    }

    #[test]
    fn day_view_box() {
        let b = task_box(day(0), day(4), day(0), 40.0, 20.0);
        assert_eq!(b, TaskBox { left: 0.0, width: 160.0 });
    }

    #[test]
    fn zero_length_task_gets_min_width() {
        let b = task_box(day(0), day(0), day(0), 40.0, 20.0);
        assert_eq!(b, TaskBox { left: 0.0, width: 20.0 });
    }

    #[test]
    fn reversed_dates_clamp_to_min_width() {
        let b = task_box(day(5), day(2), day(0), 40.0, 20.0);
        assert_eq!(b.width, 20.0);
        assert_eq!(b.left, 200.0);
    }

    #[test]
    fn task_before_view_is_pinned_to_left_edge() {
        let b = task_box(day(-3), day(2), day(0), 40.0, 20.0);
        assert_eq!(b.left, 0.0);
        assert_eq!(b.width, 200.0);
        assert_eq!(position(day(-3), day(0), 40.0), -120.0);
    }

    #[test]
    fn fractional_days_round_to_nearest_pixel() {
        let noon = day(1) + Duration::hours(12);
        assert_eq!(position(noon, day(0), 40.0), 60.0);
        // 10 days in week view: 114.28 -> 114
        assert_eq!(position(day(10), day(0), 80.0 / 7.0), 114.0);
    }

    #[test]
    fn date_from_position_snaps_to_days() {
        assert_eq!(date_from_position(114.0, day(0), 80.0 / 7.0), day(10));
        assert_eq!(date_from_position(-41.0, day(0), 40.0), day(-1));
        assert_eq!(date_from_position(19.0, day(0), 40.0), day(0));
    }

    #[test]
    fn date_from_position_saturates() {
        assert_eq!(date_from_position(1.0e30, day(0), 40.0), NaiveDateTime::MAX);
        assert_eq!(date_from_position(-1.0e30, day(0), 40.0), NaiveDateTime::MIN);
        assert_eq!(date_from_position(10.0, day(0), 0.0), NaiveDateTime::MAX);
        assert_eq!(date_from_position(0.0, day(0), 0.0), day(0));
    }

    #[test]
    fn clamp_and_point_in_box() {
        assert_eq!(clamp(5.0, 0.0, 3.0), 3.0);
        assert_eq!(clamp(-1.0, 0.0, 3.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 3.0), 2.0);

        let b = Bounds { left: 10.0, top: 10.0, width: 20.0, height: 5.0 };
        assert!(point_in_box(10.0, 10.0, &b));
        assert!(point_in_box(30.0, 15.0, &b));
        assert!(!point_in_box(30.1, 15.0, &b));
        assert!(!point_in_box(20.0, 9.9, &b));
    }

    #[test]
    fn position_edges() {
        let p = TaskPosition::from_box(TaskBox { left: 10.0, width: 30.0 }, 68.0, 40.0);
        assert_eq!(p.right(), 40.0);
        assert_eq!(p.center_y(), 88.0);
        assert_eq!(p.bounds().height, 40.0);
    }
}
