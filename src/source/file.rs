use crate::error::{LayoutError, LayoutResult};
use crate::task::{RawProgress, RawTask};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Parse either a JSON array of tasks or an object with a `tasks` array.
///
/// Only the outer shape can fail the parse. Entries that do not decode are
/// kept as placeholders so validation reports them one by one.
pub fn parse_tasks_json(input: &str) -> LayoutResult<Vec<RawTask>> {
    let entries = match serde_json::from_str::<Value>(input)? {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("tasks") {
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(LayoutError::InvalidData(format!(
                    "`tasks` must be an array, found {}",
                    json_kind(&other)
                )));
            }
            None => {
                return Err(LayoutError::InvalidData(
                    "snapshot object has no `tasks` array".to_string(),
                ));
            }
        },
        other => {
            return Err(LayoutError::InvalidData(format!(
                "expected a task array or an object with a `tasks` array, found {}",
                json_kind(&other)
            )));
        }
    };

    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect())
}

fn decode_entry(index: usize, entry: &Value) -> RawTask {
    match RawTask::deserialize(entry) {
        Ok(task) => task,
        Err(err) => {
            let id = entry
                .get("id")
                .and_then(|id| match id {
                    Value::String(text) => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| format!("#{}", index + 1));
            warn!(entry = index + 1, task_id = %id, error = %err, "undecodable task entry");
            RawTask::undecodable(id, format!("entry {}: {err}", index + 1))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn load_tasks_from_json<P: AsRef<Path>>(path: P) -> LayoutResult<Vec<RawTask>> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    parse_tasks_json(&contents)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskCsvRecord {
    id: String,
    project_id: String,
    #[serde(default)]
    project_name: String,
    #[serde(default)]
    title: String,
    planned_start: String,
    planned_end: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    progress: String,
    #[serde(default)]
    milestone: String,
    #[serde(default)]
    milestone_date: String,
}

impl TaskCsvRecord {
    fn into_task(self) -> RawTask {
        let mut task = RawTask::new(self.id, self.project_id, self.planned_start, self.planned_end);
        if !self.project_name.trim().is_empty() {
            task.project_name = self.project_name;
        }
        task.title = self.title;
        if !self.status.trim().is_empty() {
            task.status = self.status;
        }
        if !self.priority.trim().is_empty() {
            task.priority = self.priority;
        }
        task.progress = RawProgress::parse(&self.progress);
        task.milestone = parse_string_option(self.milestone);
        task.milestone_date = parse_string_option(self.milestone_date);
        task
    }
}

/// CSV with a camelCase header row matching the JSON field names.
///
/// Every column is read as text, so only a missing required header or a
/// malformed row structure fails the load.
pub fn load_tasks_from_csv<P: AsRef<Path>>(path: P) -> LayoutResult<Vec<RawTask>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    for record in reader.deserialize::<TaskCsvRecord>() {
        tasks.push(record?.into_task());
    }
    Ok(tasks)
}

/// Pick the reader from the file extension (`.csv`, otherwise JSON).
pub fn load_tasks<P: AsRef<Path>>(path: P) -> LayoutResult<Vec<RawTask>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_tasks_from_csv(path)
    } else {
        load_tasks_from_json(path)
    }
}

fn parse_string_option(input: String) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
