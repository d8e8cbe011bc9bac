use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gantt granularity. Finer levels get wider day columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    Day,
    Week,
    Month,
}

impl ZoomLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoomLevel::Day => "day",
            ZoomLevel::Week => "week",
            ZoomLevel::Month => "month",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(ZoomLevel::Day),
            "week" => Some(ZoomLevel::Week),
            "month" => Some(ZoomLevel::Month),
            _ => None,
        }
    }

    /// One step finer; `Day` stays `Day`.
    pub fn zoomed_in(self) -> Self {
        match self {
            ZoomLevel::Month => ZoomLevel::Week,
            ZoomLevel::Week | ZoomLevel::Day => ZoomLevel::Day,
        }
    }

    /// One step coarser; `Month` stays `Month`.
    pub fn zoomed_out(self) -> Self {
        match self {
            ZoomLevel::Day => ZoomLevel::Week,
            ZoomLevel::Week | ZoomLevel::Month => ZoomLevel::Month,
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column-unit width per day at each zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomWidths {
    pub day: u32,
    pub week: u32,
    pub month: u32,
}

impl Default for ZoomWidths {
    fn default() -> Self {
        Self {
            day: 40,
            week: 20,
            month: 8,
        }
    }
}

impl ZoomWidths {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day > self.week && self.week > self.month && self.month > 0 {
            Ok(())
        } else {
            Err(ConfigError::ZoomOrder {
                day: self.day,
                week: self.week,
                month: self.month,
            })
        }
    }

    pub fn width_for(&self, level: ZoomLevel) -> u32 {
        match level {
            ZoomLevel::Day => self.day,
            ZoomLevel::Week => self.week,
            ZoomLevel::Month => self.month,
        }
    }
}

/// Current zoom selection. Owned by the caller's UI state and passed in by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomState {
    level: ZoomLevel,
    widths: ZoomWidths,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomLevel::Day, ZoomWidths::default())
    }
}

impl ZoomState {
    pub fn new(level: ZoomLevel, widths: ZoomWidths) -> Self {
        Self { level, widths }
    }

    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    pub fn widths(&self) -> ZoomWidths {
        self.widths
    }

    pub fn column_width(&self) -> u32 {
        self.widths.width_for(self.level)
    }

    /// Returns `true` when the level changed.
    pub fn zoom_in(&mut self) -> bool {
        let next = self.level.zoomed_in();
        let changed = next != self.level;
        self.level = next;
        changed
    }

    /// Returns `true` when the level changed.
    pub fn zoom_out(&mut self) -> bool {
        let next = self.level.zoomed_out();
        let changed = next != self.level;
        self.level = next;
        changed
    }
}
