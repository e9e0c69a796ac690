//! Default values for newly created records.

/// Title given to a task created without one.
pub const DEFAULT_TASK_TITLE: &str = "New task";

/// Status given to a task whose target list yields no usable slug.
pub const DEFAULT_TASK_STATUS: &str = "todo";

/// Derive the default status for a task created in a list with this title:
/// lowercased, runs of non-alphanumeric characters collapsed to single
/// hyphens, leading and trailing hyphens trimmed. An empty result falls
/// back to [`DEFAULT_TASK_STATUS`].
pub fn status_for_list(list_title: &str) -> String {
    let mut slug = String::with_capacity(list_title.len());
    for c in list_title.to_lowercase().chars() {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        DEFAULT_TASK_STATUS.to_string()
    } else {
        slug.to_string()
    }
}
