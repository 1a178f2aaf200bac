//! Form bodies and their validation.
//!
//! Every field is optional at the deserialization layer so a missing field
//! turns into a field error on the redisplayed form instead of an
//! extractor rejection.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::NewTask;

const TITLE_MAX: usize = 200;
const TYPE_MAX: usize = 50;
const CONTENT_MAX: usize = 200;

const REQUIRED: &str = "This field is required.";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
}

impl TaskForm {
    pub fn validate(&self) -> Result<NewTask, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(&mut errors, "title", self.title.as_deref(), TITLE_MAX);
        let task_type = required_text(&mut errors, "type", self.task_type.as_deref(), TYPE_MAX);
        let due = match non_blank(self.due.as_deref()) {
            None => {
                errors.add("due", REQUIRED);
                None
            }
            Some(raw) => {
                let parsed = parse_due(raw);
                if parsed.is_none() {
                    errors.add("due", "Enter a valid date/time.");
                }
                parsed
            }
        };

        match (title, task_type, due) {
            (Some(title), Some(task_type), Some(due)) if errors.is_empty() => Ok(NewTask {
                title,
                task_type,
                due,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ChecklistForm {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChecklistForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        match required_text(&mut errors, "content", self.content.as_deref(), CONTENT_MAX) {
            Some(content) => Ok(content),
            None => Err(errors),
        }
    }
}

/// Accepts `datetime-local` input, a space-separated variant, or RFC 3339.
/// Times without an offset are taken as UTC.
pub fn parse_due(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let Some(value) = non_blank(value) else {
        errors.add(field, REQUIRED);
        return None;
    };
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        );
        return None;
    }
    Some(value.to_string())
}
