use crate::calendar::{CalendarCell, CalendarGridBuilder};
use crate::config::LayoutConfig;
use crate::error::ConfigError;
use crate::gantt::{GanttLayoutEngine, GanttTimeline};
use crate::grouping::group_by_project;
use crate::range::{CalendarView, DateRange, ViewMode, resolve_gantt_range};
use crate::task::{RawTask, Task};
use crate::task_validation::{TaskDiagnostic, normalize_tasks};
use crate::zoom::{ZoomLevel, ZoomState};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLegend {
    pub project_id: String,
    pub project_name: String,
    pub task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarLayout {
    pub view: CalendarView,
    pub cells: Vec<CalendarCell>,
    pub legend: Vec<ProjectLegend>,
    pub selected_task_id: Option<String>,
    pub diagnostics: Vec<TaskDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttLayout {
    #[serde(flatten)]
    pub timeline: GanttTimeline,
    pub diagnostics: Vec<TaskDiagnostic>,
}

/// Entry point tying validation, range resolution and both builders together.
///
/// Every call recomputes from scratch; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct TimelineEngine {
    config: LayoutConfig,
    grid: CalendarGridBuilder,
    gantt: GanttLayoutEngine,
}

impl TimelineEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let calendar = config.work_calendar()?;
        Ok(Self {
            grid: CalendarGridBuilder::from_config(&config)?,
            gantt: GanttLayoutEngine::new(calendar),
            config,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn calendar_view(&self, mode: ViewMode, anchor: NaiveDate) -> CalendarView {
        CalendarView::new(mode, anchor).with_week_start(self.config.week_start)
    }

    pub fn zoom_state(&self, level: ZoomLevel) -> ZoomState {
        ZoomState::new(level, self.config.zoom_widths)
    }

    pub fn gantt_range(&self, tasks: &[Task], today: NaiveDate) -> DateRange {
        resolve_gantt_range(tasks, today, &self.config)
    }

    pub fn calendar(
        &self,
        raw_tasks: &[RawTask],
        view: &CalendarView,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> CalendarLayout {
        let normalized = normalize_tasks(raw_tasks);
        let mut layout = self.calendar_for_tasks(&normalized.tasks, view, today, selected_task_id);
        layout.diagnostics = normalized.diagnostics;
        layout
    }

    pub fn calendar_for_tasks(
        &self,
        tasks: &[Task],
        view: &CalendarView,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> CalendarLayout {
        let cells = self.grid.build(view, tasks, today);
        let legend = match (cells.first(), cells.last()) {
            (Some(first), Some(last)) => {
                let visible: Vec<Task> = tasks
                    .iter()
                    .filter(|task| {
                        task.planned_start <= last.date && task.planned_end >= first.date
                    })
                    .cloned()
                    .collect();
                legend_for(&visible)
            }
            _ => Vec::new(),
        };

        CalendarLayout {
            view: *view,
            cells,
            legend,
            selected_task_id: selected_task_id.map(ToOwned::to_owned),
            diagnostics: Vec::new(),
        }
    }

    /// Gantt layout over a window resolved from the valid tasks.
    pub fn gantt(
        &self,
        raw_tasks: &[RawTask],
        zoom: &ZoomState,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> GanttLayout {
        let normalized = normalize_tasks(raw_tasks);
        let range = self.gantt_range(&normalized.tasks, today);
        GanttLayout {
            timeline: self
                .gantt
                .layout(&normalized.tasks, range, zoom, today, selected_task_id),
            diagnostics: normalized.diagnostics,
        }
    }

    /// Gantt layout over an explicit window. Bars are cut at its edges.
    pub fn gantt_in_range(
        &self,
        raw_tasks: &[RawTask],
        range: DateRange,
        zoom: &ZoomState,
        today: NaiveDate,
        selected_task_id: Option<&str>,
    ) -> GanttLayout {
        let normalized = normalize_tasks(raw_tasks);
        GanttLayout {
            timeline: self
                .gantt
                .layout(&normalized.tasks, range, zoom, today, selected_task_id),
            diagnostics: normalized.diagnostics,
        }
    }
}

fn legend_for(tasks: &[Task]) -> Vec<ProjectLegend> {
    group_by_project(tasks)
        .into_iter()
        .map(|group| ProjectLegend {
            project_id: group.project_id.to_string(),
            project_name: group.project_name.to_string(),
            task_count: group.tasks.len(),
        })
        .collect()
}
