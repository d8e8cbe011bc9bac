use crate::config::LayoutConfig;
use crate::date_math::{
    add_days, days_between, first_of_month, is_within_inclusive_range, shift_months_to_first,
    start_of_week,
};
use crate::task::Task;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive window of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn len_days(&self) -> i64 {
        days_between(self.start, self.end) + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        is_within_inclusive_range(date, self.start, self.end)
    }

    /// Every day from `start` to `end`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len_days()).map(move |offset| add_days(self.start, offset))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Visible Gantt window for `tasks`, padded so edge bars are not flush with the viewport.
///
/// With no tasks the window is centred loosely on `today`.
pub fn resolve_gantt_range(tasks: &[Task], today: NaiveDate, config: &LayoutConfig) -> DateRange {
    let earliest = tasks.iter().map(|task| task.planned_start).min();
    let latest = tasks.iter().map(|task| task.planned_end).max();

    match (earliest, latest) {
        (Some(start), Some(end)) => DateRange {
            start: add_days(start, config.gantt_padding_before.saturating_neg()),
            end: add_days(end, config.gantt_padding_after),
        },
        _ => DateRange {
            start: add_days(today, config.empty_window_before.saturating_neg()),
            end: add_days(today, config.empty_window_after),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    Week,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
        }
    }
}

/// Calendar anchor plus view mode. Navigation returns a new view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
    pub week_start: Weekday,
}

impl CalendarView {
    pub fn new(mode: ViewMode, anchor: NaiveDate) -> Self {
        Self {
            mode,
            anchor,
            week_start: Weekday::Sun,
        }
    }

    pub fn month(anchor: NaiveDate) -> Self {
        Self::new(ViewMode::Month, anchor)
    }

    pub fn week(anchor: NaiveDate) -> Self {
        Self::new(ViewMode::Week, anchor)
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// First day of the anchored month, or the start of the anchored week.
    pub fn period_start(&self) -> NaiveDate {
        match self.mode {
            ViewMode::Month => first_of_month(self.anchor),
            ViewMode::Week => start_of_week(self.anchor, self.week_start),
        }
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    pub fn today(&self, today: NaiveDate) -> Self {
        Self {
            anchor: today,
            ..*self
        }
    }

    fn shifted(&self, steps: i32) -> Self {
        let anchor = match self.mode {
            ViewMode::Month => shift_months_to_first(self.anchor, steps),
            ViewMode::Week => add_days(self.anchor, 7 * steps as i64),
        };
        Self { anchor, ..*self }
    }
}
