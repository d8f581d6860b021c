//! Visible-task derivation from search text and filter criteria.
//!
//! # Invariants
//! - Stages run in a fixed order and each one only narrows the result.
//! - An empty query, empty set or unbounded date range is a no-op stage.
//! - Input order is preserved.

use crate::model::filter::FilterOptions;
use crate::model::task::Task;

/// Returns the tasks visible for `query` and `filters`.
pub fn derive_visible_tasks(tasks: &[Task], query: &str, filters: &FilterOptions) -> Vec<Task> {
    let needle = query.trim().to_lowercase();
    let bounds = filters.date_range.bounds();

    tasks
        .iter()
        .filter(|task| needle.is_empty() || matches_query(task, &needle))
        .filter(|task| filters.status.is_empty() || filters.status.contains(&task.status))
        .filter(|task| filters.priority.is_empty() || filters.priority.contains(&task.priority))
        .filter(|task| {
            filters.projects.is_empty()
                || task
                    .project_id
                    .as_ref()
                    .is_some_and(|project_id| filters.projects.contains(project_id))
        })
        .filter(|task| match bounds {
            None => true,
            Some((start, end)) => task
                .due_date
                .is_some_and(|due| start <= due && due <= end),
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title, description and tags.
///
/// `needle` must already be lowercase.
pub fn matches_query(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || task
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
