use chrono::NaiveDate;
use timeline_layout::task::Tone;
use timeline_layout::task_validation::DateField;
use timeline_layout::{
    DiagnosticKind, RawProgress, RawTask, TaskPriority, TaskStatus, normalize_tasks,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn valid_records_become_tasks() {
    let mut raw = RawTask::new("T-1", "ECN", "2026-01-02", "2026-01-08");
    raw.project_name = "ECN rollout".into();
    raw.title = "Draft change notice".into();
    raw.status = "in_progress".into();
    raw.priority = "critical".into();
    raw.progress = RawProgress::Percent(40);
    raw.milestone = Some("Sign-off".into());
    raw.milestone_date = Some("2026-01-09".into());

    let normalized = normalize_tasks(&[raw]);
    assert!(normalized.diagnostics.is_empty());
    let task = &normalized.tasks[0];
    assert_eq!(task.planned_start, d(2026, 1, 2));
    assert_eq!(task.planned_end, d(2026, 1, 8));
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::Critical);
    assert_eq!(task.progress, 40);
    let milestone = task.milestone.as_ref().unwrap();
    assert_eq!(milestone.name, "Sign-off");
    assert_eq!(milestone.date, d(2026, 1, 9));
}

#[test]
fn timestamps_keep_their_calendar_day() {
    let raw = RawTask::new("1", "P", "2026-01-02T23:30:00+08:00", "2026-01-03 08:00:00");
    let normalized = normalize_tasks(&[raw]);
    assert_eq!(normalized.tasks[0].planned_start, d(2026, 1, 2));
    assert_eq!(normalized.tasks[0].planned_end, d(2026, 1, 3));
}

#[test]
fn malformed_dates_exclude_only_the_bad_task() {
    let tasks = vec![
        RawTask::new("ok", "P", "2026-01-02", "2026-01-03"),
        RawTask::new("bad-start", "P", "2026-13-01", "2026-01-03"),
        RawTask::new("bad-end", "P", "2026-01-02", "soon"),
        {
            let mut raw = RawTask::new("bad-milestone", "P", "2026-01-02", "2026-01-03");
            raw.milestone_date = Some("31/01/2026".into());
            raw
        },
    ];
    let normalized = normalize_tasks(&tasks);

    assert_eq!(normalized.tasks.len(), 1);
    assert_eq!(normalized.tasks[0].id, "ok");
    assert_eq!(normalized.diagnostics.len(), 3);
    assert_eq!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::MalformedDate {
            field: DateField::PlannedStart,
            value: "2026-13-01".into()
        }
    );
    assert_eq!(normalized.diagnostics[1].task_id, "bad-end");
    assert!(matches!(
        normalized.diagnostics[2].kind,
        DiagnosticKind::MalformedDate {
            field: DateField::MilestoneDate,
            ..
        }
    ));
    assert!(normalized.diagnostics.iter().all(|d| d.kind.excludes_task()));
}

#[test]
fn inverted_range_is_rejected_not_flipped() {
    let normalized = normalize_tasks(&[RawTask::new("1", "P", "2026-01-08", "2026-01-02")]);
    assert!(normalized.tasks.is_empty());
    assert_eq!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::InvertedRange {
            start: d(2026, 1, 8),
            end: d(2026, 1, 2)
        }
    );
    assert_eq!(
        normalized.diagnostics[0].message,
        "planned start 2026-01-08 is after planned end 2026-01-02"
    );
}

#[test]
fn unknown_status_and_priority_are_rejected() {
    let mut status = RawTask::new("s", "P", "2026-01-02", "2026-01-03");
    status.status = "archived".into();
    let mut priority = RawTask::new("p", "P", "2026-01-02", "2026-01-03");
    priority.priority = "urgent".into();

    let normalized = normalize_tasks(&[status, priority]);
    assert!(normalized.tasks.is_empty());
    assert_eq!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::UnknownStatus {
            value: "archived".into()
        }
    );
    assert_eq!(
        normalized.diagnostics[1].kind,
        DiagnosticKind::UnknownPriority {
            value: "urgent".into()
        }
    );
}

#[test]
fn out_of_range_progress_is_clamped_and_reported() {
    let mut raw = RawTask::new("1", "P", "2026-01-02", "2026-01-03");
    raw.progress = RawProgress::Percent(140);
    let normalized = normalize_tasks(&[raw]);
    assert_eq!(normalized.tasks[0].progress, 100);
    assert_eq!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::ProgressOutOfRange { value: 140 }
    );
    assert!(!normalized.diagnostics[0].kind.excludes_task());
}

#[test]
fn unreadable_progress_keeps_task_at_zero() {
    let mut raw = RawTask::new("1", "P", "2026-01-02", "2026-01-03");
    raw.progress = RawProgress::Invalid("lots".into());
    let normalized = normalize_tasks(&[raw]);
    assert_eq!(normalized.tasks.len(), 1);
    assert_eq!(normalized.tasks[0].progress, 0);
    assert_eq!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::InvalidProgress {
            value: "lots".into()
        }
    );
    assert!(!normalized.diagnostics[0].kind.excludes_task());
}

#[test]
fn blank_status_and_priority_take_defaults() {
    let mut raw = RawTask::new("1", "P", "2026-01-02", "2026-01-03");
    raw.status = " ".into();
    raw.priority = String::new();
    let normalized = normalize_tasks(&[raw]);
    assert!(normalized.diagnostics.is_empty());
    assert_eq!(normalized.tasks[0].status, TaskStatus::Pending);
    assert_eq!(normalized.tasks[0].priority, TaskPriority::Medium);
}

#[test]
fn undecodable_record_is_excluded_with_reason() {
    let normalized = normalize_tasks(&[
        RawTask::undecodable("#2", "entry 2: missing field `id`"),
        RawTask::new("1", "P", "2026-01-02", "2026-01-03"),
    ]);
    assert_eq!(normalized.tasks.len(), 1);
    assert_eq!(normalized.diagnostics[0].task_id, "#2");
    assert!(matches!(
        normalized.diagnostics[0].kind,
        DiagnosticKind::MalformedRecord { .. }
    ));
    assert!(normalized.diagnostics[0].message.contains("missing field"));
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let normalized = normalize_tasks(&[
        RawTask::new("1", "A", "2026-01-02", "2026-01-03"),
        RawTask::new("1", "B", "2026-01-02", "2026-01-03"),
    ]);
    assert_eq!(normalized.tasks.len(), 1);
    assert_eq!(normalized.tasks[0].project_id, "A");
    assert_eq!(normalized.diagnostics[0].kind, DiagnosticKind::DuplicateId);
}

#[test]
fn empty_project_name_falls_back_to_id() {
    let mut raw = RawTask::new("1", "HR-7", "2026-01-02", "2026-01-03");
    raw.project_name = "  ".into();
    let normalized = normalize_tasks(&[raw]);
    assert_eq!(normalized.tasks[0].project_name, "HR-7");
}

#[test]
fn display_metadata_covers_every_variant() {
    assert_eq!(TaskStatus::Blocked.display().tone, Tone::Danger);
    assert_eq!(TaskStatus::Completed.display().label, "Completed");
    assert_eq!(TaskPriority::High.display().tone, Tone::Warning);
    assert!(TaskPriority::Critical > TaskPriority::Low);
    assert_eq!(TaskStatus::from_str("In-Progress"), Some(TaskStatus::InProgress));
}
