use crate::task::{Milestone, RawProgress, RawTask, Task, TaskPriority, TaskStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    PlannedStart,
    PlannedEnd,
    MilestoneDate,
}

impl DateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateField::PlannedStart => "plannedStart",
            DateField::PlannedEnd => "plannedEnd",
            DateField::MilestoneDate => "milestoneDate",
        }
    }
}

/// Why a task was excluded from (or adjusted for) layout.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DiagnosticKind {
    #[error("record could not be decoded: {reason}")]
    MalformedRecord { reason: String },
    #[error("{} '{value}' is not a valid calendar date", .field.as_str())]
    MalformedDate { field: DateField, value: String },
    #[error("planned start {start} is after planned end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("unknown status '{value}'")]
    UnknownStatus { value: String },
    #[error("unknown priority '{value}'")]
    UnknownPriority { value: String },
    #[error("progress {value} outside 0..=100, clamped")]
    ProgressOutOfRange { value: i64 },
    #[error("progress '{value}' is not a number, using 0")]
    InvalidProgress { value: String },
    #[error("duplicate task id")]
    DuplicateId,
}

impl DiagnosticKind {
    /// Whether the task was dropped from layout output.
    pub fn excludes_task(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::ProgressOutOfRange { .. } | DiagnosticKind::InvalidProgress { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDiagnostic {
    pub task_id: String,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
}

impl TaskDiagnostic {
    pub fn new(task_id: impl Into<String>, kind: DiagnosticKind) -> Self {
        let message = kind.to_string();
        Self {
            task_id: task_id.into(),
            kind,
            message,
        }
    }
}

/// Validated tasks in input order plus diagnostics for everything rejected.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTasks {
    pub tasks: Vec<Task>,
    pub diagnostics: Vec<TaskDiagnostic>,
}

pub fn parse_date(value: &str, field: DateField) -> Result<NaiveDate, DiagnosticKind> {
    let trimmed = value.trim();
    // Timestamps keep only their calendar part.
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| DiagnosticKind::MalformedDate {
        field,
        value: value.to_string(),
    })
}

/// Validate a single raw record.
///
/// On success returns the task and any non-fatal diagnostic (clamped or
/// unreadable progress). Blank status and priority take their defaults.
pub fn validate_task(raw: &RawTask) -> Result<(Task, Option<DiagnosticKind>), DiagnosticKind> {
    if let Some(reason) = &raw.decode_error {
        return Err(DiagnosticKind::MalformedRecord {
            reason: reason.clone(),
        });
    }
    let planned_start = parse_date(&raw.planned_start, DateField::PlannedStart)?;
    let planned_end = parse_date(&raw.planned_end, DateField::PlannedEnd)?;
    if planned_start > planned_end {
        return Err(DiagnosticKind::InvertedRange {
            start: planned_start,
            end: planned_end,
        });
    }

    let status = if raw.status.trim().is_empty() {
        TaskStatus::Pending
    } else {
        TaskStatus::from_str(&raw.status).ok_or_else(|| DiagnosticKind::UnknownStatus {
            value: raw.status.clone(),
        })?
    };
    let priority = if raw.priority.trim().is_empty() {
        TaskPriority::Medium
    } else {
        TaskPriority::from_str(&raw.priority).ok_or_else(|| DiagnosticKind::UnknownPriority {
            value: raw.priority.clone(),
        })?
    };

    let milestone = match raw.milestone_date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => Some(Milestone {
            name: raw.milestone.clone().unwrap_or_default(),
            date: parse_date(date, DateField::MilestoneDate)?,
        }),
        _ => None,
    };

    let (progress, warning) = match &raw.progress {
        RawProgress::Percent(value) if (0..=100).contains(value) => (*value as u8, None),
        RawProgress::Percent(value) => (
            (*value).clamp(0, 100) as u8,
            Some(DiagnosticKind::ProgressOutOfRange { value: *value }),
        ),
        RawProgress::Invalid(text) => (
            0,
            Some(DiagnosticKind::InvalidProgress {
                value: text.clone(),
            }),
        ),
    };

    let project_name = if raw.project_name.trim().is_empty() {
        raw.project_id.clone()
    } else {
        raw.project_name.clone()
    };

    let task = Task {
        id: raw.id.clone(),
        project_id: raw.project_id.clone(),
        project_name,
        title: raw.title.clone(),
        planned_start,
        planned_end,
        status,
        priority,
        progress,
        milestone,
    };
    Ok((task, warning))
}

/// Validate a task snapshot. Bad records never abort the batch.
pub fn normalize_tasks(raw_tasks: &[RawTask]) -> NormalizedTasks {
    let mut normalized = NormalizedTasks {
        tasks: Vec::with_capacity(raw_tasks.len()),
        diagnostics: Vec::new(),
    };
    let mut seen_ids = HashSet::with_capacity(raw_tasks.len());

    for raw in raw_tasks {
        let outcome = if seen_ids.contains(raw.id.as_str()) {
            Err(DiagnosticKind::DuplicateId)
        } else {
            validate_task(raw)
        };

        match outcome {
            Ok((task, warning)) => {
                if let Some(kind) = warning {
                    warn!(task_id = %raw.id, "{kind}");
                    normalized
                        .diagnostics
                        .push(TaskDiagnostic::new(raw.id.clone(), kind));
                }
                seen_ids.insert(raw.id.as_str());
                normalized.tasks.push(task);
            }
            Err(kind) => {
                warn!(task_id = %raw.id, "excluding task from layout: {kind}");
                normalized
                    .diagnostics
                    .push(TaskDiagnostic::new(raw.id.clone(), kind));
            }
        }
    }

    normalized
}
