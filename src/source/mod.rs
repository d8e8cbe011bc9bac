//! Readers for task snapshots handed over by the data-loading layer.
//!
//! These only decode records. Validation happens in
//! [`crate::task_validation::normalize_tasks`] so bad rows become diagnostics.

pub mod file;

pub use file::{load_tasks, load_tasks_from_csv, load_tasks_from_json, parse_tasks_json};
