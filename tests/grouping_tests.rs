use chrono::NaiveDate;
use timeline_layout::{Task, group_by_project};

fn task(id: &str, project: &str) -> Task {
    let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    Task::new(id, project, day, day).unwrap()
}

#[test]
fn grouping_preserves_first_seen_project_order() {
    let tasks = vec![task("1", "B"), task("2", "A"), task("3", "B")];
    let groups = group_by_project(&tasks);

    let order: Vec<&str> = groups.iter().map(|g| g.project_id).collect();
    assert_eq!(order, vec!["B", "A"]);

    let b: Vec<&str> = groups[0].tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(b, vec!["1", "3"]);
    let a: Vec<&str> = groups[1].tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(a, vec!["2"]);
}

#[test]
fn grouping_does_not_sort_by_date_or_name() {
    let later = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let tasks = vec![
        Task::new("z", "Z", later, later).unwrap(),
        task("a", "A"),
        task("y", "Z"),
    ];
    let groups = group_by_project(&tasks);
    assert_eq!(groups[0].project_id, "Z");
    let z: Vec<&str> = groups[0].tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(z, vec!["z", "y"]);
}

#[test]
fn group_label_comes_from_first_task_of_project() {
    let tasks = vec![
        task("1", "P").with_project_name("Pilot line"),
        task("2", "P").with_project_name("Renamed"),
    ];
    let groups = group_by_project(&tasks);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].project_name, "Pilot line");
}

#[test]
fn empty_input_yields_no_groups() {
    assert!(group_by_project(&[]).is_empty());
}
