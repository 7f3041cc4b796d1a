//! Request and response bodies of the task API.

use crate::task::{
    domain::{Task, TaskStatus},
    services::TaskInput,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Parses a calendar day.
///
/// Accepts `YYYY-MM-DD`, a local date-time such as `2024-06-01T09:30:00`, or
/// an RFC 3339 timestamp. Date-times are truncated to their calendar day.
///
/// # Errors
///
/// Returns the date parse error when no accepted layout matches.
pub fn parse_calendar_day(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let value = raw.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|moment| moment.date_naive()))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|moment| moment.date())
        })
}

/// Reads an optional string, treating `null` and blank values as absent.
fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

fn optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    non_blank(deserializer)?
        .as_deref()
        .map(parse_calendar_day)
        .transpose()
        .map_err(de::Error::custom)
}

fn optional_status<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    non_blank(deserializer)?
        .as_deref()
        .map(str::parse::<TaskStatus>)
        .transpose()
        .map_err(de::Error::custom)
}

/// Body of create and update requests.
///
/// Missing fields take their empty values, so a body without `title` is
/// rejected by title validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    /// Task title.
    #[serde(default)]
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: Option<String>,
    /// Numeric status code.
    ///
    /// Ignored on create. An unknown code is rejected only when an update
    /// applies it to an existing task.
    #[serde(default)]
    pub status: Option<i64>,
    /// Due date.
    #[serde(default, deserialize_with = "optional_day")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPayload {
    /// Converts the body into service input.
    #[must_use]
    pub fn into_input(self) -> TaskInput {
        let status_code = self
            .status
            .unwrap_or_else(|| i64::from(TaskStatus::default().code()));
        TaskInput::new(self.title)
            .with_description(self.description.unwrap_or_default())
            .with_status_code(status_code)
            .with_due_date(self.due_date)
    }
}

/// Query string of the list endpoint.
///
/// Blank parameters are treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ListTasksQuery {
    /// Status code or name to match.
    #[serde(default, deserialize_with = "optional_status")]
    pub status: Option<TaskStatus>,
    /// Due date to match.
    #[serde(default, rename = "vencimento", deserialize_with = "optional_day")]
    pub due_date: Option<NaiveDate>,
}

/// Task representation returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Numeric status code.
    pub status: TaskStatus,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            due_date: task.due_date(),
        }
    }
}
