use crate::task::Task;
use std::collections::HashMap;

/// Tasks sharing a project id, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Stable partition by `project_id`.
///
/// Groups appear in the order their project id is first seen and tasks keep
/// their input order. Nothing is re-sorted. The group label is the project
/// name of the first task seen for that project.
pub fn group_by_project(tasks: &[Task]) -> Vec<ProjectGroup<'_>> {
    let mut groups: Vec<ProjectGroup<'_>> = Vec::new();
    let mut index_by_project: HashMap<&str, usize> = HashMap::new();

    for task in tasks {
        let idx = *index_by_project
            .entry(task.project_id.as_str())
            .or_insert_with(|| {
                groups.push(ProjectGroup {
                    project_id: task.project_id.as_str(),
                    project_name: task.project_name.as_str(),
                    tasks: Vec::new(),
                });
                groups.len() - 1
            });
        groups[idx].tasks.push(task);
    }

    groups
}
