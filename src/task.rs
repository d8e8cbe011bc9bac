use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Task record as supplied by the data-loading layer, before validation.
///
/// Dates, status and priority are kept as the raw strings the backend sent so
/// one malformed record can be reported and skipped instead of failing the
/// whole snapshot. Text fields take any JSON value as its text; `null` and
/// missing values read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub project_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_name: String,
    #[serde(default, alias = "name", deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub planned_start: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub planned_end: String,
    #[serde(default = "default_status", deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default = "default_priority", deserialize_with = "lenient_text")]
    pub priority: String,
    #[serde(default)]
    pub progress: RawProgress,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_text"
    )]
    pub milestone: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_text"
    )]
    pub milestone_date: Option<String>,
    /// Set by loaders when the record could not be decoded at all.
    #[serde(skip)]
    pub decode_error: Option<String>,
}

fn default_status() -> String {
    TaskStatus::Pending.as_str().to_string()
}

fn default_priority() -> String {
    TaskPriority::Medium.as_str().to_string()
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

/// Progress as sent. Non-numeric input is kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawProgress {
    Percent(i64),
    Invalid(String),
}

impl Default for RawProgress {
    fn default() -> Self {
        RawProgress::Percent(0)
    }
}

impl RawProgress {
    /// Text form used by CSV columns; blank means unset.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return RawProgress::default();
        }
        match trimmed.parse::<i64>() {
            Ok(value) => RawProgress::Percent(value),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => RawProgress::Percent(value.round() as i64),
                _ => RawProgress::Invalid(trimmed.to_string()),
            },
        }
    }
}

impl Serialize for RawProgress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RawProgress::Percent(value) => serializer.serialize_i64(*value),
            RawProgress::Invalid(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for RawProgress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => RawProgress::default(),
            Some(Value::Number(number)) => match number.as_i64() {
                Some(value) => RawProgress::Percent(value),
                None => RawProgress::parse(&number.to_string()),
            },
            Some(Value::String(text)) => RawProgress::parse(&text),
            Some(other) => RawProgress::Invalid(other.to_string()),
        })
    }
}

impl RawTask {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        planned_start: impl Into<String>,
        planned_end: impl Into<String>,
    ) -> Self {
        let project_id = project_id.into();
        Self {
            id: id.into(),
            project_name: project_id.clone(),
            project_id,
            title: String::new(),
            planned_start: planned_start.into(),
            planned_end: planned_end.into(),
            status: default_status(),
            priority: default_priority(),
            progress: RawProgress::default(),
            milestone: None,
            milestone_date: None,
            decode_error: None,
        }
    }

    /// Placeholder for an entry that could not be decoded; validation rejects it.
    pub fn undecodable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            decode_error: Some(reason.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Blocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Visual emphasis a renderer should give an item. Colours are its business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayMeta {
    pub label: &'static str,
    pub tone: Tone,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" | "in-progress" => Some(TaskStatus::InProgress),
            "blocked" => Some(TaskStatus::Blocked),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    pub fn display(&self) -> DisplayMeta {
        match self {
            TaskStatus::Pending => DisplayMeta {
                label: "Pending",
                tone: Tone::Neutral,
            },
            TaskStatus::InProgress => DisplayMeta {
                label: "In progress",
                tone: Tone::Info,
            },
            TaskStatus::Blocked => DisplayMeta {
                label: "Blocked",
                tone: Tone::Danger,
            },
            TaskStatus::Completed => DisplayMeta {
                label: "Completed",
                tone: Tone::Success,
            },
        }
    }
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            "critical" => Some(TaskPriority::Critical),
            _ => None,
        }
    }

    pub fn display(&self) -> DisplayMeta {
        match self {
            TaskPriority::Low => DisplayMeta {
                label: "Low",
                tone: Tone::Neutral,
            },
            TaskPriority::Medium => DisplayMeta {
                label: "Medium",
                tone: Tone::Info,
            },
            TaskPriority::High => DisplayMeta {
                label: "High",
                tone: Tone::Warning,
            },
            TaskPriority::Critical => DisplayMeta {
                label: "Critical",
                tone: Tone::Danger,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub date: NaiveDate,
}

/// A validated task. `planned_start <= planned_end` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub project_name: String,
    pub title: String,
    pub planned_start: NaiveDate,
    pub planned_end: NaiveDate,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
}

impl Task {
    /// Returns `None` when `planned_start > planned_end`.
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        planned_start: NaiveDate,
        planned_end: NaiveDate,
    ) -> Option<Self> {
        if planned_start > planned_end {
            return None;
        }
        let project_id = project_id.into();
        Some(Self {
            id: id.into(),
            project_name: project_id.clone(),
            project_id,
            title: String::new(),
            planned_start,
            planned_end,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            progress: 0,
            milestone: None,
        })
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_milestone(mut self, name: impl Into<String>, date: NaiveDate) -> Self {
        self.milestone = Some(Milestone {
            name: name.into(),
            date,
        });
        self
    }

    /// Unfinished and past its planned end as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_completed() && self.planned_end < today
    }

    /// Ends on `date` and still open.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        !self.status.is_completed() && self.planned_end == date
    }
}
