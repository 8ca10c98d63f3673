//! Display strings for dates, durations and labels.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::model::ViewMode;

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `Jan 05 - Feb 10, 2024`
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y"))
}

/// Header label for a tick in the given view mode.
pub fn format_date_label(date: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Day | ViewMode::Week => date.format("%b %d").to_string(),
        ViewMode::Month => date.format("%b %Y").to_string(),
    }
}

pub fn format_progress(progress: i64) -> String {
    format!("{}%", progress)
}

/// Coarse human distance between two instants, in either order.
pub fn format_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let days = (end - start).num_days().abs();
    match days {
        0 => "less than a day".to_string(),
        1 => "1 day".to_string(),
        2..=29 => format!("{} days", days),
        30..=44 => "about 1 month".to_string(),
        45..=364 => format!("{} months", ((days as f64) / 30.0).round() as i64),
        _ => {
            let years = days / 365;
            if years == 1 {
                "about 1 year".to_string()
            } else {
                format!("about {} years", years)
            }
        }
    }
}

/// ISO-8601 week number.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Up to two uppercase initials from a name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
