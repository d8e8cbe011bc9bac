//! Tunable layout constants.
//!
//! Overflow thresholds and padding are product choices rather than
//! requirements, so they live here instead of inside the builders.

use crate::error::{ConfigError, LayoutResult};
use crate::work_calendar::{WorkCalendar, WorkCalendarConfig};
use crate::zoom::ZoomWidths;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Upper bound for any padding or empty-window value, roughly a century.
pub const MAX_PADDING_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Days added before the earliest planned start in a Gantt window.
    pub gantt_padding_before: i64,
    /// Days added after the latest planned end in a Gantt window.
    pub gantt_padding_after: i64,
    /// Days before today when there are no tasks.
    pub empty_window_before: i64,
    /// Days after today when there are no tasks.
    pub empty_window_after: i64,
    /// Starting tasks shown per month cell before collapsing into a count.
    pub month_overflow_limit: usize,
    /// Tasks shown per week cell before collapsing into a count.
    pub week_overflow_limit: usize,
    pub week_start: Weekday,
    pub zoom_widths: ZoomWidths,
    pub work_calendar: WorkCalendarConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gantt_padding_before: 3,
            gantt_padding_after: 7,
            empty_window_before: 7,
            empty_window_after: 30,
            month_overflow_limit: 2,
            week_overflow_limit: 3,
            week_start: Weekday::Sun,
            zoom_widths: ZoomWidths::default(),
            work_calendar: WorkCalendarConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON config file; missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> LayoutResult<Self> {
        let file = File::open(path)?;
        let config: LayoutConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zoom_widths.validate()?;
        for (name, value) in [
            ("ganttPaddingBefore", self.gantt_padding_before),
            ("ganttPaddingAfter", self.gantt_padding_after),
            ("emptyWindowBefore", self.empty_window_before),
            ("emptyWindowAfter", self.empty_window_after),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativePadding { name, value });
            }
            if value > MAX_PADDING_DAYS {
                return Err(ConfigError::PaddingTooLarge {
                    name,
                    value,
                    max: MAX_PADDING_DAYS,
                });
            }
        }
        if self.month_overflow_limit == 0 {
            return Err(ConfigError::ZeroOverflowLimit {
                name: "monthOverflowLimit",
            });
        }
        if self.week_overflow_limit == 0 {
            return Err(ConfigError::ZeroOverflowLimit {
                name: "weekOverflowLimit",
            });
        }
        WorkCalendar::from_config(&self.work_calendar)?;
        Ok(())
    }

    pub fn work_calendar(&self) -> Result<WorkCalendar, ConfigError> {
        WorkCalendar::from_config(&self.work_calendar)
    }

    pub fn with_gantt_padding(mut self, before: i64, after: i64) -> Self {
        self.gantt_padding_before = before;
        self.gantt_padding_after = after;
        self
    }

    pub fn with_empty_window(mut self, before: i64, after: i64) -> Self {
        self.empty_window_before = before;
        self.empty_window_after = after;
        self
    }

    pub fn with_overflow_limits(mut self, month: usize, week: usize) -> Self {
        self.month_overflow_limit = month;
        self.week_overflow_limit = week;
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_zoom_widths(mut self, widths: ZoomWidths) -> Self {
        self.zoom_widths = widths;
        self
    }

    pub fn with_work_calendar(mut self, calendar: WorkCalendarConfig) -> Self {
        self.work_calendar = calendar;
        self
    }
}
