use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::task::midnight;
use crate::error::TimelineError;
use crate::layout::{self, TimeScale};

/// Controls what granularity the timeline displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

/// The two numbers each view mode fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewModeConfig {
    pub pixels_per_day: f32,
    /// Nominal width of one header column.
    pub column_width: f32,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Day, ViewMode::Week, ViewMode::Month];

    pub fn config(self) -> ViewModeConfig {
        match self {
            ViewMode::Day => ViewModeConfig {
                pixels_per_day: 40.0,
                column_width: 40.0,
            },
            ViewMode::Week => ViewModeConfig {
                pixels_per_day: 80.0 / 7.0,
                column_width: 80.0,
            },
            ViewMode::Month => ViewModeConfig {
                pixels_per_day: 120.0 / 30.0,
                column_width: 120.0,
            },
        }
    }

    pub fn pixels_per_day(self) -> f32 {
        self.config().pixels_per_day
    }

    /// One step finer, saturating at `Day`.
    pub fn zoom_in(self) -> Self {
        match self {
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week | ViewMode::Day => ViewMode::Day,
        }
    }

    /// One step coarser, saturating at `Month`.
    pub fn zoom_out(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Week,
            ViewMode::Week | ViewMode::Month => ViewMode::Month,
        }
    }

    pub fn can_zoom_in(self) -> bool {
        self != ViewMode::Day
    }

    pub fn can_zoom_out(self) -> bool {
        self != ViewMode::Month
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" => Ok(ViewMode::Day),
            "week" | "weeks" => Ok(ViewMode::Week),
            "month" | "months" => Ok(ViewMode::Month),
            _ => Err(TimelineError::UnknownViewMode(s.to_string())),
        }
    }
}

/// The visible window of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineViewport {
    /// The leftmost visible instant.
    pub start: NaiveDateTime,
    /// The rightmost visible instant.
    pub end: NaiveDateTime,
    pub mode: ViewMode,
}

impl TimelineViewport {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, mode: ViewMode) -> Self {
        Self { start, end, mode }
    }

    /// First of `today`'s month through the last day of the month two months later.
    pub fn around(today: NaiveDate, mode: ViewMode) -> Self {
        let first = first_of_month(today);
        let start = midnight(first);
        let end = midnight(last_day_of_month(first, 2));
        Self::new(start, end, mode)
    }

    pub fn pixels_per_day(&self) -> f32 {
        self.mode.pixels_per_day()
    }

    /// Convert an instant to an x-pixel offset from the viewport start.
    pub fn date_to_x(&self, date: NaiveDateTime) -> f32 {
        layout::position(date, self.start, self.pixels_per_day())
    }

    /// Convert an x-pixel offset back to an instant.
    pub fn x_to_date(&self, x: f32) -> NaiveDateTime {
        layout::date_from_position(x, self.start, self.pixels_per_day())
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.end).max(0.0)
    }

    pub fn zoom_in(&mut self) {
        self.mode = self.mode.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.mode = self.mode.zoom_out();
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Scroll the viewport by a number of days. A scroll that would leave
    /// the representable range is ignored.
    pub fn scroll_days(&mut self, days: i64) {
        let shift = |t: NaiveDateTime| {
            Duration::try_days(days).and_then(|d| t.checked_add_signed(d))
        };
        if let (Some(start), Some(end)) = (shift(self.start), shift(self.end)) {
            self.start = start;
            self.end = end;
        }
    }

    /// First of the previous month through the end of the month after next.
    pub fn scroll_to_today(&mut self, today: NaiveDate) {
        let this_month = first_of_month(today);
        let previous = this_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(this_month);
        self.start = midnight(previous);
        self.end = midnight(last_day_of_month(this_month, 1));
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn time_scale(&self) -> TimeScale {
        layout::time_scale(self.start, self.end, self.mode)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month `months_ahead` months after `first`'s month.
fn last_day_of_month(first: NaiveDate, months_ahead: u32) -> NaiveDate {
    first
        .checked_add_months(Months::new(months_ahead + 1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn view_mode_constants() {
        assert_eq!(ViewMode::Day.config().pixels_per_day, 40.0);
        assert_eq!(ViewMode::Week.config().column_width, 80.0);
        assert!((ViewMode::Week.pixels_per_day() - 80.0 / 7.0).abs() < 1e-6);
        assert_eq!(ViewMode::Month.pixels_per_day(), 4.0);
    }

    #[test]
    fn zoom_saturates_at_both_ends() {
        assert_eq!(ViewMode::Month.zoom_in(), ViewMode::Week);
        assert_eq!(ViewMode::Week.zoom_in(), ViewMode::Day);
        assert_eq!(ViewMode::Day.zoom_in(), ViewMode::Day);
        assert_eq!(ViewMode::Day.zoom_out(), ViewMode::Week);
        assert_eq!(ViewMode::Month.zoom_out(), ViewMode::Month);
        assert!(!ViewMode::Day.can_zoom_in());
        assert!(!ViewMode::Month.can_zoom_out());
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!("months".parse::<ViewMode>().unwrap(), ViewMode::Month);
        assert!(matches!(
            "year".parse::<ViewMode>(),
            Err(TimelineError::UnknownViewMode(_))
        ));
    }

    #[test]
    fn around_covers_three_months() {
        let vp = TimelineViewport::around(date(2024, 1, 20), ViewMode::Week);
        assert_eq!(vp.start.date(), date(2024, 1, 1));
        assert_eq!(vp.end.date(), date(2024, 3, 31));
    }

    #[test]
    fn scroll_to_today_recenters() {
        let mut vp = TimelineViewport::around(date(2024, 1, 20), ViewMode::Day);
        vp.scroll_to_today(date(2024, 6, 10));
        assert_eq!(vp.start.date(), date(2024, 5, 1));
        assert_eq!(vp.end.date(), date(2024, 7, 31));
    }

    #[test]
    fn date_to_x_follows_mode() {
        let mut vp = TimelineViewport::around(date(2024, 1, 1), ViewMode::Day);
        let tenth = midnight(date(2024, 1, 11));
        assert_eq!(vp.date_to_x(tenth), 400.0);
        vp.zoom_out();
        vp.zoom_out();
        assert_eq!(vp.date_to_x(tenth), 40.0);
        assert_eq!(vp.x_to_date(40.0), tenth);
    }

    #[test]
    fn scroll_moves_both_edges() {
        let mut vp = TimelineViewport::around(date(2024, 1, 1), ViewMode::Day);
        vp.scroll_days(7);
        assert_eq!(vp.start.date(), date(2024, 1, 8));
        assert_eq!(vp.end.date(), date(2024, 4, 7));

        let before = vp.clone();
        vp.scroll_days(i64::MAX);
        assert_eq!(vp, before);
    }
}
