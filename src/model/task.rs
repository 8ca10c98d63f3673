use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task or milestone placed on a row of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "startDate", with = "date_serde")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDate", with = "date_serde")]
    pub end: NaiveDateTime,
    /// Percent complete. Anything outside 0 to 100 is kept as read and
    /// reported by validation.
    #[serde(default)]
    pub progress: i64,
    /// The row (resource) this task is drawn on.
    pub row_id: String,
    /// Ids of the tasks this one waits on. May name tasks that do not exist.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Display color for the task bar (stored as `#rrggbb`).
    #[serde(default, with = "color_serde", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color32>,
    /// If true, this is a milestone (rendered as a diamond).
    #[serde(default)]
    pub is_milestone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    /// Create a task spanning whole days, starting at midnight of `start`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        row_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: midnight(start),
            end: midnight(end),
            progress: 0,
            row_id: row_id.into(),
            dependencies: Vec::new(),
            color: None,
            is_milestone: false,
            assignee: None,
            description: None,
        }
    }

    /// Create a new milestone.
    pub fn new_milestone(
        id: impl Into<String>,
        title: impl Into<String>,
        date: NaiveDate,
        row_id: impl Into<String>,
    ) -> Self {
        Self {
            is_milestone: true,
            ..Self::new(id, title, date, date, row_id)
        }
    }

    /// A fresh random id for tasks created by the host.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Builder-style helper used when assembling fixtures.
    pub fn depends_on(mut self, ids: &[&str]) -> Self {
        self.dependencies = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_progress(mut self, progress: i64) -> Self {
        self.progress = progress;
        self
    }
}

/// Midnight at the start of `date`.
pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Serde helper for task instants.
///
/// Accepts either a bare `YYYY-MM-DD` (read as midnight) or a full
/// `YYYY-MM-DDTHH:MM:SS`; always writes the full form.
mod date_serde {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";
    const DATE_FMT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATETIME_FMT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let s = raw.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FMT) {
            return Ok(dt);
        }
        NaiveDate::parse_from_str(s, DATE_FMT)
            .map(super::midnight)
            .map_err(|_| de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

/// Serde helper for `Option<Color32>` as a `#rrggbb` string.
mod color_serde {
    use egui::Color32;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match color {
            Some(c) => serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Deserialize::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => parse_hex(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid color '{}'", s))),
        }
    }

    fn parse_hex(s: &str) -> Option<Color32> {
        let hex = s.trim().strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}
