//! Task data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a task
pub type TaskId = u64;

/// One to-do item
///
/// Serialized with camelCase field names so the persisted snapshot matches
/// the layout written by the web version of the list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// A new, not yet completed task
    pub fn new(id: TaskId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            created_at,
        }
    }

    /// Whether the task is visible under `filter`
    pub fn matches(&self, filter: Filter) -> bool {
        match filter {
            Filter::All => true,
            Filter::Active => !self.completed,
            Filter::Completed => self.completed,
        }
    }
}

/// Which tasks a view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timestamps written like JavaScript's `Date.prototype.toISOString`
///
/// `2024-01-01T00:00:00.000Z`: UTC, millisecond precision. Any RFC 3339
/// timestamp is accepted when reading.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid createdAt {raw:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(completed: bool) -> Task {
        let mut task = Task::new(1, "Buy milk", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        task.completed = completed;
        task
    }

    #[test]
    fn filter_matching() {
        let active = task(false);
        let done = task(true);

        assert!(active.matches(Filter::All) && done.matches(Filter::All));
        assert!(active.matches(Filter::Active) && !done.matches(Filter::Active));
        assert!(!active.matches(Filter::Completed) && done.matches(Filter::Completed));
    }

    #[test]
    fn serializes_with_camel_case_and_js_timestamp() {
        let json = serde_json::to_string(&task(true)).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"title":"Buy milk","completed":true,"createdAt":"2024-01-01T00:00:00.000Z"}"#
        );
    }

    #[test]
    fn accepts_offset_timestamps() {
        let json = r#"{"id":2,"title":"X","completed":false,"createdAt":"2024-01-01T02:00:00.250+02:00"}"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let json = r#"{"id":2,"title":"X","completed":false,"createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn filter_labels() {
        let labels: Vec<String> = Filter::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["All", "Active", "Completed"]);
        assert_eq!(Filter::default(), Filter::All);
    }
}
