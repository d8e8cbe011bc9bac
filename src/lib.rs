pub mod calendar;
pub mod config;
pub mod date_math;
pub mod engine;
pub mod error;
pub mod gantt;
pub mod grouping;
pub mod range;
pub mod source;
pub mod task;
pub mod task_validation;
pub mod work_calendar;
pub mod zoom;

pub use calendar::{CalendarCell, CalendarGridBuilder, CellOverflow};
pub use config::LayoutConfig;
pub use engine::{CalendarLayout, GanttLayout, ProjectLegend, TimelineEngine};
pub use error::{ConfigError, LayoutError, LayoutResult};
pub use gantt::{GanttGroup, GanttLayoutEngine, GanttTimeline, TaskLayout, TimelineColumn};
pub use grouping::{ProjectGroup, group_by_project};
pub use range::{CalendarView, DateRange, ViewMode, resolve_gantt_range};
pub use source::{load_tasks, load_tasks_from_csv, load_tasks_from_json, parse_tasks_json};
pub use task::{Milestone, RawProgress, RawTask, Task, TaskPriority, TaskStatus};
pub use task_validation::{DiagnosticKind, NormalizedTasks, TaskDiagnostic, normalize_tasks};
pub use work_calendar::{WorkCalendar, WorkCalendarConfig};
pub use zoom::{ZoomLevel, ZoomState, ZoomWidths};
