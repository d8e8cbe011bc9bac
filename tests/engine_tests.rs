use chrono::NaiveDate;
use timeline_layout::{
    ConfigError, DateRange, LayoutConfig, RawTask, TimelineEngine, ViewMode, ZoomLevel,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn snapshot() -> Vec<RawTask> {
    let mut first = RawTask::new("1", "B", "2026-01-02", "2026-01-08");
    first.project_name = "Procurement".into();
    let second = RawTask::new("2", "A", "2026-01-05", "2026-01-06");
    let third = RawTask::new("3", "B", "2026-01-20", "2026-01-22");
    let broken = RawTask::new("4", "A", "2026-01-10", "2026-01-01");
    vec![first, second, third, broken]
}

#[test]
fn gantt_uses_valid_tasks_and_reports_the_rest() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let zoom = engine.zoom_state(ZoomLevel::Day);
    let layout = engine.gantt(&snapshot(), &zoom, d(2026, 1, 5), Some("3"));

    let timeline = &layout.timeline;
    assert_eq!(timeline.range.start, d(2025, 12, 30));
    assert_eq!(timeline.range.end, d(2026, 1, 29));
    assert_eq!(timeline.today_offset, Some(6));
    assert_eq!(timeline.groups.len(), 2);
    assert_eq!(timeline.groups[0].project_id, "B");
    assert_eq!(timeline.groups[0].project_name, "Procurement");
    assert_eq!(timeline.find("1").unwrap().day_offset_from_range_start, 3);
    assert_eq!(timeline.find("1").unwrap().duration_in_days, 7);
    assert!(timeline.find("3").unwrap().is_selected);
    assert!(timeline.find("4").is_none());

    assert_eq!(layout.diagnostics.len(), 1);
    assert_eq!(layout.diagnostics[0].task_id, "4");
}

#[test]
fn gantt_today_outside_window_has_no_marker() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let zoom = engine.zoom_state(ZoomLevel::Week);
    let layout = engine.gantt(&snapshot(), &zoom, d(2026, 6, 1), None);
    assert_eq!(layout.timeline.today_offset, None);
    assert_eq!(layout.timeline.column_width, 20);
}

#[test]
fn gantt_in_explicit_range() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let zoom = engine.zoom_state(ZoomLevel::Month);
    let range = DateRange::new(d(2026, 1, 1), d(2026, 1, 10)).unwrap();
    let layout = engine.gantt_in_range(&snapshot(), range, &zoom, d(2026, 1, 5), None);
    assert_eq!(layout.timeline.columns.len(), 10);
    assert!(layout.timeline.find("3").is_none());
    assert_eq!(layout.timeline.today_offset, Some(4));
}

#[test]
fn calendar_layout_carries_legend_selection_and_diagnostics() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let view = engine.calendar_view(ViewMode::Month, d(2026, 1, 15));
    let layout = engine.calendar(&snapshot(), &view, d(2026, 1, 5), Some("2"));

    assert_eq!(layout.cells.len(), 42);
    assert_eq!(layout.selected_task_id.as_deref(), Some("2"));
    assert_eq!(layout.diagnostics.len(), 1);
    let legend: Vec<(&str, usize)> = layout
        .legend
        .iter()
        .map(|l| (l.project_id.as_str(), l.task_count))
        .collect();
    assert_eq!(legend, vec![("B", 2), ("A", 1)]);
}

#[test]
fn week_legend_only_counts_visible_tasks() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let view = engine.calendar_view(ViewMode::Week, d(2026, 1, 21));
    let layout = engine.calendar(&snapshot(), &view, d(2026, 1, 21), None);
    assert_eq!(layout.cells.len(), 7);
    assert_eq!(layout.legend.len(), 1);
    assert_eq!(layout.legend[0].project_id, "B");
    assert_eq!(layout.legend[0].task_count, 1);
}

#[test]
fn layouts_serialize_with_camel_case_fields() {
    let engine = TimelineEngine::new(LayoutConfig::default()).unwrap();
    let zoom = engine.zoom_state(ZoomLevel::Day);
    let layout = engine.gantt(&[], &zoom, d(2026, 1, 5), None);
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["todayOffset"], 7);
    assert_eq!(json["range"]["start"], "2025-12-29");
    assert_eq!(json["columns"].as_array().unwrap().len(), 38);
    assert!(json["selectedTaskId"].is_null());

    let broken = engine.gantt(&snapshot()[3..], &zoom, d(2026, 1, 5), None);
    let json = serde_json::to_value(&broken).unwrap();
    assert_eq!(json["diagnostics"][0]["kind"], "invertedRange");
    assert_eq!(json["diagnostics"][0]["taskId"], "4");
}

#[test]
fn engine_rejects_invalid_config() {
    let config = LayoutConfig::default().with_overflow_limits(2, 0);
    assert!(TimelineEngine::new(config).is_err());
}

#[test]
fn engine_rejects_padding_it_cannot_lay_out() {
    let config = LayoutConfig::default().with_gantt_padding(3, 1_000_000_000_000_000);
    assert!(matches!(
        TimelineEngine::new(config),
        Err(ConfigError::PaddingTooLarge { .. })
    ));
}
