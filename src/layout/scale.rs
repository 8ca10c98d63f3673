//! Header tick generation.

use chrono::{Duration, Months, NaiveDateTime};

use crate::format;
use crate::model::ViewMode;

/// Lazy sequence of tick instants from a start up to and including an end.
///
/// Clone it before iterating to walk the ticks a second time.
#[derive(Debug, Clone)]
pub struct TimeScale {
    start: NaiveDateTime,
    end: NaiveDateTime,
    mode: ViewMode,
    index: u32,
    done: bool,
}

/// A header tick with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTick {
    pub date: NaiveDateTime,
    pub label: String,
}

/// Ticks every day, seven days, or calendar month from `start` to `end`.
pub fn time_scale(start: NaiveDateTime, end: NaiveDateTime, mode: ViewMode) -> TimeScale {
    TimeScale {
        start,
        end,
        mode,
        index: 0,
        done: false,
    }
}

/// [`time_scale`] paired with the header label of each tick.
pub fn scale_labels(start: NaiveDateTime, end: NaiveDateTime, mode: ViewMode) -> Vec<ScaleTick> {
    time_scale(start, end, mode)
        .map(|date| ScaleTick {
            label: format::format_date_label(date.date(), mode),
            date,
        })
        .collect()
}

impl TimeScale {
    /// Tick `k` is computed from the start rather than the previous tick, so a
    /// month clamped to its last day does not shorten the ones after it.
    /// `None` once the tick is past the last representable instant.
    fn tick(&self, k: u32) -> Option<NaiveDateTime> {
        let days = |n: i64| Duration::try_days(n).and_then(|d| self.start.checked_add_signed(d));
        match self.mode {
            ViewMode::Day => days(k as i64),
            ViewMode::Week => days(7 * k as i64),
            ViewMode::Month => self.start.checked_add_months(Months::new(k)),
        }
    }
}

impl Iterator for TimeScale {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.tick(self.index) {
            Some(date) if date <= self.end => {
                self.index += 1;
                Some(date)
            }
            _ => {
                self.done = true;
                None
            }
        }
    }
}
