//! Gantt timeline layout.
//!
//! Positions are in day-units relative to the start of the visible range;
//! `bar` multiplies them by the current zoom's column width. Pixel scaling is
//! left to the renderer.

use crate::date_math::{days_between, is_same_day};
use crate::grouping::group_by_project;
use crate::range::DateRange;
use crate::task::{Task, TaskPriority, TaskStatus};
use crate::work_calendar::WorkCalendar;
use crate::zoom::{ZoomLevel, ZoomState};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_holiday: bool,
    /// First day of a month; renderers place the month label here.
    pub month_label_boundary: bool,
}

/// Horizontal extent in column units (`day-units * column width`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarExtent {
    pub offset: i64,
    pub width: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneLayout {
    pub name: String,
    pub date: NaiveDate,
    pub day_offset: i64,
    pub position: i64,
    /// Milestone date lies inside the visible range.
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLayout {
    pub task_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub progress: u8,
    pub day_offset_from_range_start: i64,
    pub duration_in_days: i64,
    pub bar: BarExtent,
    /// Advisory only: does not move or resize the bar.
    pub is_overdue: bool,
    pub is_selected: bool,
    /// Bar was cut at a range edge.
    pub clipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<MilestoneLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttGroup {
    pub project_id: String,
    pub project_name: String,
    pub task_layouts: Vec<TaskLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttTimeline {
    pub range: DateRange,
    pub zoom: ZoomLevel,
    pub column_width: u32,
    pub columns: Vec<TimelineColumn>,
    pub groups: Vec<GanttGroup>,
    pub today_offset: Option<i64>,
    pub selected_task_id: Option<String>,
}

impl GanttTimeline {
    pub fn total_width(&self) -> i64 {
        self.columns.len() as i64 * self.column_width as i64
    }

    pub fn task_layouts(&self) -> impl Iterator<Item = &TaskLayout> {
        self.groups.iter().flat_map(|group| group.task_layouts.iter())
    }

    pub fn find(&self, task_id: &str) -> Option<&TaskLayout> {
        self.task_layouts().find(|layout| layout.task_id == task_id)
    }
}

/// Offset of `today` within `range`, or `None` when it falls outside.
pub fn today_offset(range: &DateRange, today: NaiveDate) -> Option<i64> {
    range
        .contains(today)
        .then(|| days_between(range.start, today))
}

#[derive(Debug, Clone, Default)]
pub struct GanttLayoutEngine {
    calendar: WorkCalendar,
}

impl GanttLayoutEngine {
    pub fn new(calendar: WorkCalendar) -> Self {
        Self { calendar }
    }

    pub fn columns(&self, range: &DateRange, today: NaiveDate) -> Vec<TimelineColumn> {
        range
            .days()
            .map(|date| TimelineColumn {
                date,
                is_today: is_same_day(date, today),
                is_weekend: self.calendar.is_weekend(date),
                is_holiday: self.calendar.is_holiday(date),
                month_label_boundary: date.day() == 1,
            })
            .collect()
    }

    /// Layout for a single task, or `None` when it lies entirely outside `range`.
    ///
    /// Bars crossing a range edge are cut to the visible part.
    pub fn task_layout(
        &self,
        task: &Task,
        range: &DateRange,
        column_width: u32,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> Option<TaskLayout> {
        if task.planned_end < range.start || task.planned_start > range.end {
            return None;
        }
        let visible_start = task.planned_start.max(range.start);
        let visible_end = task.planned_end.min(range.end);
        let day_offset = days_between(range.start, visible_start);
        let duration = days_between(visible_start, visible_end) + 1;
        let width = column_width as i64;

        let milestone = task.milestone.as_ref().map(|milestone| {
            let day_offset = days_between(range.start, milestone.date);
            MilestoneLayout {
                name: milestone.name.clone(),
                date: milestone.date,
                day_offset,
                position: day_offset * width,
                visible: range.contains(milestone.date),
            }
        });

        Some(TaskLayout {
            task_id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            progress: task.progress,
            day_offset_from_range_start: day_offset,
            duration_in_days: duration,
            bar: BarExtent {
                offset: day_offset * width,
                width: duration * width,
            },
            is_overdue: task.is_overdue(today),
            is_selected: selected_task_id == Some(task.id.as_str()),
            clipped: visible_start != task.planned_start || visible_end != task.planned_end,
            milestone,
        })
    }

    pub fn layout(
        &self,
        tasks: &[Task],
        range: DateRange,
        zoom: &ZoomState,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> GanttTimeline {
        let column_width = zoom.column_width();
        let columns = self.columns(&range, today);

        let groups: Vec<GanttGroup> = group_by_project(tasks)
            .into_iter()
            .filter_map(|group| {
                let task_layouts: Vec<TaskLayout> = group
                    .tasks
                    .iter()
                    .filter_map(|task| {
                        let layout =
                            self.task_layout(task, &range, column_width, today, selected_task_id);
                        if layout.is_none() {
                            debug!(task_id = %task.id, %range, "task outside visible range");
                        }
                        layout
                    })
                    .collect();
                (!task_layouts.is_empty()).then(|| GanttGroup {
                    project_id: group.project_id.to_string(),
                    project_name: group.project_name.to_string(),
                    task_layouts,
                })
            })
            .collect();

        debug!(
            %range,
            zoom = zoom.level().as_str(),
            columns = columns.len(),
            groups = groups.len(),
            "built gantt timeline"
        );

        GanttTimeline {
            range,
            zoom: zoom.level(),
            column_width,
            columns,
            groups,
            today_offset: today_offset(&range, today),
            selected_task_id: selected_task_id.map(ToOwned::to_owned),
        }
    }
}
