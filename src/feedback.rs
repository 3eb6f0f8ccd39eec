//! Launcher feedback rendering.
//!
//! Produces the `{"items": [...]}` JSON document a script-filter launcher
//! reads from stdout. One item per note, plus warning items for a missing
//! API token, an empty result, and fatal errors.

use std::path::Path;

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::models::Note;

/// A list of launcher items.
#[derive(Debug, Default, Serialize)]
pub struct Feedback {
    items: Vec<Item>,
}

/// One row in the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// Item icon given as a path to an image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub path: String,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Adds an actionable item for `note`, passing its identifier as the arg.
    pub fn push_note(&mut self, note: &Note, now: OffsetDateTime, icon: &Path) {
        let id = note.identifier().to_string();
        self.items.push(Item {
            uid: Some(id.clone()),
            title: note.title().to_string(),
            subtitle: format!(
                "Last edited {}",
                humanize_time(note.modification_time(), now)
            ),
            arg: Some(id),
            valid: true,
            icon: Some(Icon {
                path: icon.display().to_string(),
            }),
        });
    }

    /// Adds a non-actionable warning item.
    pub fn push_warning(&mut self, title: impl Into<String>, subtitle: impl Into<String>) {
        self.items.push(Item {
            uid: None,
            title: title.into(),
            subtitle: subtitle.into(),
            arg: None,
            valid: false,
            icon: None,
        });
    }

    /// Adds the "no results" warning if nothing else was pushed.
    pub fn warn_empty(&mut self, title: &str, subtitle: &str) {
        if self.items.is_empty() {
            self.push_warning(title, subtitle);
        }
    }

    /// Serializes the feedback document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Feedback carrying a single error item, shown when the search fails.
pub fn error_feedback(error: &anyhow::Error) -> Feedback {
    let mut feedback = Feedback::new();
    feedback.push_warning(format!("Error: {error:#}"), "Check the workflow log for details");
    feedback
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 12 * MONTH;
const LONG_TIME: i64 = 37 * YEAR;

/// Magnitude table: below `limit` seconds, print `format` with the count
/// obtained by dividing by `divisor` (or the fixed text when `divisor` is 0).
const MAGNITUDES: &[(i64, &str, i64)] = &[
    (1, "now", 0),
    (2, "1 second", 0),
    (MINUTE, "{} seconds", 1),
    (2 * MINUTE, "1 minute", 0),
    (HOUR, "{} minutes", MINUTE),
    (2 * HOUR, "1 hour", 0),
    (DAY, "{} hours", HOUR),
    (2 * DAY, "1 day", 0),
    (WEEK, "{} days", DAY),
    (2 * WEEK, "1 week", 0),
    (MONTH, "{} weeks", WEEK),
    (2 * MONTH, "1 month", 0),
    (YEAR, "{} months", MONTH),
    (18 * MONTH, "1 year", 0),
    (2 * YEAR, "2 years", 0),
    (LONG_TIME, "{} years", YEAR),
];

/// Formats `then` relative to `now`, e.g. "3 hours ago" or "2 days from now".
pub fn humanize_time(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let (delta, suffix) = if then <= now {
        (now - then, "ago")
    } else {
        (then - now, "from now")
    };
    relative(delta, suffix)
}

fn relative(delta: Duration, suffix: &str) -> String {
    let secs = delta.whole_seconds();

    for &(limit, format, divisor) in MAGNITUDES {
        if secs < limit {
            if format == "now" {
                return format.to_string();
            }
            let text = if divisor == 0 {
                format.to_string()
            } else {
                format.replace("{}", &(secs / divisor).to_string())
            };
            return format!("{text} {suffix}");
        }
    }

    format!("a long while {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteIdentifier;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-05-01 12:00 UTC);

    fn ago(seconds: i64) -> String {
        humanize_time(NOW - Duration::seconds(seconds), NOW)
    }

    #[test]
    fn humanize_covers_each_magnitude() {
        assert_eq!(ago(0), "now");
        assert_eq!(ago(1), "1 second ago");
        assert_eq!(ago(30), "30 seconds ago");
        assert_eq!(ago(90), "1 minute ago");
        assert_eq!(ago(45 * MINUTE), "45 minutes ago");
        assert_eq!(ago(HOUR + 5), "1 hour ago");
        assert_eq!(ago(5 * HOUR), "5 hours ago");
        assert_eq!(ago(DAY + HOUR), "1 day ago");
        assert_eq!(ago(3 * DAY), "3 days ago");
        assert_eq!(ago(WEEK + DAY), "1 week ago");
        assert_eq!(ago(3 * WEEK), "3 weeks ago");
        assert_eq!(ago(MONTH + DAY), "1 month ago");
        assert_eq!(ago(4 * MONTH), "4 months ago");
        assert_eq!(ago(YEAR + MONTH), "1 year ago");
        assert_eq!(ago(20 * MONTH), "2 years ago");
        assert_eq!(ago(5 * YEAR), "5 years ago");
        assert_eq!(ago(40 * YEAR), "a long while ago");
    }

    #[test]
    fn humanize_future_times() {
        let later = NOW + Duration::hours(3);
        assert_eq!(humanize_time(later, NOW), "3 hours from now");
    }

    #[test]
    fn note_item_uses_identifier_as_uid_and_arg() {
        let note = Note::new(
            NoteIdentifier::new("ABC-123"),
            "Groceries",
            NOW - Duration::days(3),
            NOW - Duration::hours(2),
        );
        let mut feedback = Feedback::new();
        feedback.push_note(&note, NOW, Path::new("icon.png"));

        let json: serde_json::Value = serde_json::from_str(&feedback.to_json().unwrap()).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["uid"], "ABC-123");
        assert_eq!(item["arg"], "ABC-123");
        assert_eq!(item["title"], "Groceries");
        assert_eq!(item["subtitle"], "Last edited 2 hours ago");
        assert_eq!(item["valid"], true);
        assert_eq!(item["icon"]["path"], "icon.png");
    }

    #[test]
    fn warn_empty_only_fires_without_items() {
        let mut feedback = Feedback::new();
        feedback.warn_empty("No matching notes found", "Try another query");
        assert_eq!(feedback.items().len(), 1);
        assert!(!feedback.items()[0].valid);

        feedback.warn_empty("No matching notes found", "Try another query");
        assert_eq!(feedback.items().len(), 1);
    }

    #[test]
    fn warning_items_omit_uid_arg_and_icon() {
        let mut feedback = Feedback::new();
        feedback.push_warning("BEAR_TOKEN missing", "Set it in workflow settings");

        let json: serde_json::Value = serde_json::from_str(&feedback.to_json().unwrap()).unwrap();
        let item = json["items"][0].as_object().unwrap();
        assert!(!item.contains_key("uid"));
        assert!(!item.contains_key("arg"));
        assert!(!item.contains_key("icon"));
        assert_eq!(item["valid"], false);
    }

    #[test]
    fn error_feedback_includes_context_chain() {
        let error = anyhow::anyhow!("no such table: ZSFNOTE").context("Failed to search notes");
        let feedback = error_feedback(&error);
        assert_eq!(
            feedback.items()[0].title,
            "Error: Failed to search notes: no such table: ZSFNOTE"
        );
    }
}
