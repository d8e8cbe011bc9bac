//! Month and week calendar grids.
//!
//! A month grid is always six full weeks (42 cells) so its height does not
//! change between months; a week grid is seven cells. Each cell lists the
//! tasks active that day, the ones starting that day and the open ones due
//! that day, plus a bounded "+N more" summary for dense days.

use crate::config::LayoutConfig;
use crate::date_math::{
    add_days, first_of_month, is_same_day, is_within_inclusive_range, start_of_week,
};
use crate::error::ConfigError;
use crate::range::{CalendarView, ViewMode};
use crate::task::Task;
use crate::work_calendar::WorkCalendar;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

pub const MONTH_GRID_CELLS: usize = 42;
pub const WEEK_GRID_CELLS: usize = 7;

/// Task ids a renderer should draw in a cell and how many were collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOverflow {
    pub shown: Vec<String>,
    pub hidden: usize,
}

impl CellOverflow {
    fn truncate(tasks: &[Task], limit: usize) -> Self {
        Self {
            shown: tasks.iter().take(limit).map(|task| task.id.clone()).collect(),
            hidden: tasks.len().saturating_sub(limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Inside the anchored month (always true in week view).
    pub is_current_period: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub day_tasks: Vec<Task>,
    pub starting_tasks: Vec<Task>,
    pub due_tasks: Vec<Task>,
    pub overflow: CellOverflow,
}

#[derive(Debug, Clone)]
pub struct CalendarGridBuilder {
    month_overflow_limit: usize,
    week_overflow_limit: usize,
    calendar: WorkCalendar,
}

impl Default for CalendarGridBuilder {
    fn default() -> Self {
        let config = LayoutConfig::default();
        Self {
            month_overflow_limit: config.month_overflow_limit,
            week_overflow_limit: config.week_overflow_limit,
            calendar: WorkCalendar::default(),
        }
    }
}

impl CalendarGridBuilder {
    pub fn from_config(config: &LayoutConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            month_overflow_limit: config.month_overflow_limit,
            week_overflow_limit: config.week_overflow_limit,
            calendar: config.work_calendar()?,
        })
    }

    pub fn with_work_calendar(mut self, calendar: WorkCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Dates covered by the grid for `view`, first to last.
    pub fn grid_dates(view: &CalendarView) -> Vec<NaiveDate> {
        let (first, count) = match view.mode {
            ViewMode::Month => (
                start_of_week(first_of_month(view.anchor), view.week_start),
                MONTH_GRID_CELLS,
            ),
            ViewMode::Week => (start_of_week(view.anchor, view.week_start), WEEK_GRID_CELLS),
        };
        (0..count as i64).map(|offset| add_days(first, offset)).collect()
    }

    pub fn build(
        &self,
        view: &CalendarView,
        tasks: &[Task],
        today: NaiveDate,
    ) -> Vec<CalendarCell> {
        let anchor_month = (view.anchor.year(), view.anchor.month());
        let cells: Vec<CalendarCell> = Self::grid_dates(view)
            .into_iter()
            .map(|date| {
                let is_current_period = match view.mode {
                    ViewMode::Month => (date.year(), date.month()) == anchor_month,
                    ViewMode::Week => true,
                };
                self.build_cell(view.mode, date, is_current_period, tasks, today)
            })
            .collect();

        debug!(
            mode = view.mode.as_str(),
            anchor = %view.anchor,
            cells = cells.len(),
            tasks = tasks.len(),
            "built calendar grid"
        );
        cells
    }

    fn build_cell(
        &self,
        mode: ViewMode,
        date: NaiveDate,
        is_current_period: bool,
        tasks: &[Task],
        today: NaiveDate,
    ) -> CalendarCell {
        let day_tasks: Vec<Task> = tasks
            .iter()
            .filter(|task| is_within_inclusive_range(date, task.planned_start, task.planned_end))
            .cloned()
            .collect();
        let starting_tasks: Vec<Task> = day_tasks
            .iter()
            .filter(|task| is_same_day(task.planned_start, date))
            .cloned()
            .collect();
        let due_tasks: Vec<Task> = day_tasks
            .iter()
            .filter(|task| task.is_due_on(date))
            .cloned()
            .collect();

        let overflow = match mode {
            ViewMode::Month => CellOverflow::truncate(&starting_tasks, self.month_overflow_limit),
            ViewMode::Week => CellOverflow::truncate(&day_tasks, self.week_overflow_limit),
        };

        CalendarCell {
            date,
            is_current_period,
            is_today: is_same_day(date, today),
            is_weekend: self.calendar.is_weekend(date),
            is_holiday: self.calendar.is_holiday(date),
            day_tasks,
            starting_tasks,
            due_tasks,
            overflow,
        }
    }
}
